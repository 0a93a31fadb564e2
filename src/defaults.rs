//! Built-in category set used on first launch and whenever stored
//! categories cannot be read

use crate::{category::Category, id::Id};

const DEFAULT_CATEGORIES: [(&str, [&str; 15]); 16] = [
    (
        "Animales",
        [
            "Perro", "Gato", "Elefante", "Jirafa", "León", "Tortuga", "Pingüino", "Delfín",
            "Canguro", "Serpiente", "Mariposa", "Caballo", "Búho", "Cocodrilo", "Pulpo",
        ],
    ),
    (
        "Comida",
        [
            "Pizza", "Hamburguesa", "Helado", "Taco", "Espagueti", "Sandía", "Plátano", "Pastel",
            "Sushi", "Palomitas", "Huevo frito", "Zanahoria", "Queso", "Galleta", "Piña",
        ],
    ),
    (
        "Objetos",
        [
            "Paraguas", "Reloj", "Llave", "Tijeras", "Lámpara", "Gafas", "Martillo", "Escoba",
            "Teléfono", "Vela", "Candado", "Mochila", "Silla", "Espejo", "Cepillo de dientes",
        ],
    ),
    (
        "Profesiones",
        [
            "Bombero", "Doctor", "Cocinero", "Astronauta", "Pintor", "Policía", "Carpintero",
            "Piloto", "Dentista", "Jardinero", "Cartero", "Fotógrafo", "Mago", "Pescador",
            "Peluquero",
        ],
    ),
    (
        "Deportes",
        [
            "Fútbol", "Baloncesto", "Tenis", "Natación", "Boxeo", "Ciclismo", "Golf", "Surf",
            "Esquí", "Béisbol", "Voleibol", "Karate", "Patinaje", "Escalada", "Remo",
        ],
    ),
    (
        "Lugares",
        [
            "Playa", "Montaña", "Hospital", "Escuela", "Castillo", "Desierto", "Aeropuerto",
            "Biblioteca", "Circo", "Isla", "Volcán", "Granja", "Museo", "Cueva", "Estadio",
        ],
    ),
    (
        "Transporte",
        [
            "Bicicleta", "Avión", "Barco", "Tren", "Helicóptero", "Submarino", "Cohete",
            "Autobús", "Moto", "Globo aerostático", "Patineta", "Tractor", "Ambulancia",
            "Velero", "Teleférico",
        ],
    ),
    (
        "Naturaleza",
        [
            "Árbol", "Flor", "Río", "Arcoíris", "Nube", "Rayo", "Sol", "Luna", "Estrella",
            "Cascada", "Cactus", "Hoja", "Nieve", "Tornado", "Hongo",
        ],
    ),
    (
        "Acciones",
        [
            "Correr", "Dormir", "Bailar", "Nadar", "Cantar", "Saltar", "Llorar", "Reír",
            "Cocinar", "Leer", "Escribir", "Pescar", "Estornudar", "Aplaudir", "Bostezar",
        ],
    ),
    (
        "Películas",
        [
            "Titanic", "El Rey León", "Tiburón", "Star Wars", "Frozen", "Toy Story", "Harry Potter",
            "Jurassic Park", "Buscando a Nemo", "Shrek", "Coco", "Spider-Man", "Batman", "Avatar",
            "E.T.",
        ],
    ),
    (
        "Instrumentos",
        [
            "Guitarra", "Piano", "Batería", "Violín", "Trompeta", "Flauta", "Arpa", "Saxofón",
            "Acordeón", "Maracas", "Tambor", "Xilófono", "Armónica", "Triángulo", "Ukelele",
        ],
    ),
    (
        "Ropa",
        [
            "Sombrero", "Bufanda", "Zapato", "Calcetín", "Corbata", "Vestido", "Guantes",
            "Pijama", "Chaqueta", "Bota", "Cinturón", "Falda", "Gorra", "Bañador", "Pantalón",
        ],
    ),
    (
        "Fantasía",
        [
            "Dragón", "Unicornio", "Sirena", "Bruja", "Fantasma", "Vampiro", "Hada", "Robot",
            "Extraterrestre", "Zombi", "Gigante", "Duende", "Pirata", "Caballero", "Momia",
        ],
    ),
    (
        "Casa",
        [
            "Cama", "Sofá", "Nevera", "Lavadora", "Bañera", "Ventana", "Puerta", "Chimenea",
            "Escalera", "Televisión", "Almohada", "Microondas", "Cortina", "Alfombra", "Inodoro",
        ],
    ),
    (
        "Cuerpo",
        [
            "Nariz", "Oreja", "Ojo", "Mano", "Pie", "Rodilla", "Codo", "Diente", "Lengua",
            "Cabello", "Ombligo", "Hombro", "Uña", "Ceja", "Corazón",
        ],
    ),
    (
        "Fiestas",
        [
            "Cumpleaños", "Navidad", "Piñata", "Fuegos artificiales", "Regalo", "Disfraz",
            "Globo", "Confeti", "Tarta", "Calabaza", "Árbol de Navidad", "Boda", "Serpentina",
            "Karaoke", "Brindis",
        ],
    ),
];

/// Returns a fresh copy of the built-in categories
///
/// Identifiers are fixed so that a reset always produces the same set.
pub fn categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .zip(1u128..)
        .map(|((name, words), n)| Category {
            id: Id::from_u128(n),
            name: (*name).to_owned(),
            words: words.iter().map(|w| (*w).to_owned()).collect(),
        })
        .collect()
}
