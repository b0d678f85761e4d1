//! Offered sessions shown on `/sessions`

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferedSession {
    pub id: u32,
    pub name: &'static str,
    /// Price in euros
    pub price: u32,
    /// Duration in minutes
    pub duration: u32,
}

pub const OFFERED_SESSIONS: [OfferedSession; 6] = [
    OfferedSession { id: 1, name: "Yoga", price: 15, duration: 60 },
    OfferedSession { id: 2, name: "Pilates", price: 18, duration: 50 },
    OfferedSession { id: 3, name: "Meditación", price: 10, duration: 30 },
    OfferedSession { id: 4, name: "Spinning", price: 12, duration: 45 },
    OfferedSession { id: 5, name: "Entrenamiento funcional", price: 20, duration: 60 },
    OfferedSession { id: 6, name: "Estiramientos", price: 8, duration: 25 },
];
