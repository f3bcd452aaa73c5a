use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Fruit {
    pub id: &'static str,
    pub name: &'static str,
    /// Swatch color as `0xRRGGBB`.
    pub color: u32,
    pub in_season: bool,
}

const CATALOG: &[Fruit] = &[
    Fruit {
        id: "apple",
        name: "Apple",
        color: 0xd94a38,
        in_season: true,
    },
    Fruit {
        id: "banana",
        name: "Banana",
        color: 0xf2d34f,
        in_season: true,
    },
    Fruit {
        id: "cherry",
        name: "Cherry",
        color: 0x9b1b30,
        in_season: false,
    },
    Fruit {
        id: "grape",
        name: "Grape",
        color: 0x6f2da8,
        in_season: true,
    },
    Fruit {
        id: "kiwi",
        name: "Kiwi",
        color: 0x8ee53f,
        in_season: true,
    },
    Fruit {
        id: "lemon",
        name: "Lemon",
        color: 0xfff44f,
        in_season: true,
    },
    Fruit {
        id: "mango",
        name: "Mango",
        color: 0xffa62b,
        in_season: false,
    },
    Fruit {
        id: "orange",
        name: "Orange",
        color: 0xff8c00,
        in_season: true,
    },
    Fruit {
        id: "pear",
        name: "Pear",
        color: 0xc9cc3f,
        in_season: true,
    },
    Fruit {
        id: "plum",
        name: "Plum",
        color: 0x8e4585,
        in_season: false,
    },
    Fruit {
        id: "strawberry",
        name: "Strawberry",
        color: 0xfc5a8d,
        in_season: true,
    },
    Fruit {
        id: "watermelon",
        name: "Watermelon",
        color: 0x4caf50,
        in_season: false,
    },
];

/// The fruits shown by the demo, in their initial order.
pub fn catalog() -> Vec<Fruit> {
    CATALOG.to_vec()
}
