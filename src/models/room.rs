use serde::{Deserialize, Serialize};

/// Static catalog entry. Rooms are fixed at process start and never
/// created or removed at runtime.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Room {
    pub id: u32,
    pub name: String,
    pub capacity: u32,
    pub amenities: Vec<String>,
    pub price_per_night: f64,
    pub image: String,
}

pub fn room_catalog() -> Vec<Room> {
    vec![
        Room {
            id: 1,
            name: "Deluxe Suite".to_string(),
            capacity: 2,
            amenities: vec![
                "AC".to_string(),
                "WiFi".to_string(),
                "TV".to_string(),
                "Attached Bath".to_string(),
            ],
            price_per_night: 2000.0,
            image: "https://images.unsplash.com/photo-1631049307264-da0ec9d70304?w=800&h=600&fit=crop"
                .to_string(),
        },
        Room {
            id: 2,
            name: "Standard Room".to_string(),
            capacity: 3,
            amenities: vec![
                "AC".to_string(),
                "WiFi".to_string(),
                "Attached Bath".to_string(),
            ],
            price_per_night: 1500.0,
            image: "https://images.unsplash.com/photo-1598928506311-c55ded91a20c?w=800&h=600&fit=crop"
                .to_string(),
        },
    ]
}

pub fn find_room(id: u32) -> Option<Room> {
    room_catalog().into_iter().find(|room| room.id == id)
}
