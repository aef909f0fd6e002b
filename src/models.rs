//! Record types for the five store collections.
//!
//! Serialized field names stay camelCase so snapshots written by this
//! build remain readable by the original console and vice versa.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type RecordId = u32;

/// A persistable record collection member.
///
/// Each entity declares the storage key of its collection snapshot, a
/// display name for messages, id access, and the default records used to
/// lazily seed an absent collection on first read.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + 'static {
    const STORE_KEY: &'static str;
    const NAME: &'static str;

    fn id(&self) -> RecordId;
    fn set_id(&mut self, id: RecordId);

    fn seed() -> Vec<Self>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: RecordId,
    pub name: String,
    pub genre: String,
    pub platform: String,
    pub price: f64,
    pub release_date: NaiveDate,
    pub rating: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub country: String,
    pub favorite_genre: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: RecordId,
    pub name: String,
    pub company: String,
    pub release_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: RecordId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(OrderStatus::Pending),
            "Completed" => Some(OrderStatus::Completed),
            "Cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        };
        write!(f, "{label}")
    }
}

/// Order rows snapshot the player and game names at write time. Renaming
/// a player or game later does not rewrite existing orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: RecordId,
    pub player_id: RecordId,
    pub player_name: String,
    pub game_id: RecordId,
    pub game_name: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub status: OrderStatus,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // Seed literals below are all valid calendar dates.
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

impl Entity for Game {
    const STORE_KEY: &'static str = "mymanager_games";
    const NAME: &'static str = "Game";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn seed() -> Vec<Self> {
        let rows = [
            (1, "The Witcher 3", "RPG", "PC", 29.99, (2015, 5, 19), 9.5, "An open-world RPG adventure"),
            (2, "Cyberpunk 2077", "RPG", "PC", 49.99, (2020, 12, 10), 7.5, "Futuristic RPG in Night City"),
            (3, "God of War", "Action", "PlayStation", 39.99, (2018, 4, 20), 9.8, "Epic action-adventure game"),
            (4, "Halo Infinite", "FPS", "Xbox", 59.99, (2021, 12, 8), 8.5, "Master Chief returns"),
            (5, "Mario Odyssey", "Platform", "Nintendo Switch", 59.99, (2017, 10, 27), 9.7, "3D platforming adventure"),
            (6, "Elden Ring", "RPG", "PC", 59.99, (2022, 2, 25), 9.6, "Open-world action RPG"),
            (7, "Horizon Zero Dawn", "Action", "PlayStation", 19.99, (2017, 2, 28), 9.3, "Post-apocalyptic action RPG"),
            (8, "Forza Horizon 5", "Racing", "Xbox", 59.99, (2021, 11, 9), 9.0, "Open-world racing game"),
        ];
        rows.into_iter()
            .map(
                |(id, name, genre, platform, price, (y, m, d), rating, description)| Game {
                    id,
                    name: name.to_string(),
                    genre: genre.to_string(),
                    platform: platform.to_string(),
                    price,
                    release_date: date(y, m, d),
                    rating,
                    description: description.to_string(),
                },
            )
            .collect()
    }
}

impl Entity for Player {
    const STORE_KEY: &'static str = "mymanager_players";
    const NAME: &'static str = "Player";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn seed() -> Vec<Self> {
        let rows = [
            (1, "John Doe", "john@example.com", 25, "USA", "RPG"),
            (2, "Jane Smith", "jane@example.com", 28, "UK", "Action"),
            (3, "Ahmed Al-Mansouri", "ahmed@example.com", 22, "UAE", "Racing"),
            (4, "Marie Dubois", "marie@example.com", 30, "France", "RPG"),
            (5, "Carlos Rodriguez", "carlos@example.com", 27, "Spain", "FPS"),
            (6, "Yuki Tanaka", "yuki@example.com", 24, "Japan", "Platform"),
            (7, "Emma Wilson", "emma@example.com", 26, "Canada", "Action"),
            (8, "Mohammed Hassan", "mohammed@example.com", 29, "Morocco", "RPG"),
        ];
        rows.into_iter()
            .map(|(id, name, email, age, country, favorite_genre)| Player {
                id,
                name: name.to_string(),
                email: email.to_string(),
                age,
                country: country.to_string(),
                favorite_genre: favorite_genre.to_string(),
            })
            .collect()
    }
}

impl Entity for Platform {
    const STORE_KEY: &'static str = "mymanager_platforms";
    const NAME: &'static str = "Platform";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn seed() -> Vec<Self> {
        let rows = [
            (1, "PC", "Various", 1981),
            (2, "PlayStation 5", "Sony", 2020),
            (3, "Xbox Series X", "Microsoft", 2020),
            (4, "Nintendo Switch", "Nintendo", 2017),
            (5, "PlayStation 4", "Sony", 2013),
            (6, "Xbox One", "Microsoft", 2013),
            (7, "Steam Deck", "Valve", 2022),
        ];
        rows.into_iter()
            .map(|(id, name, company, release_year)| Platform {
                id,
                name: name.to_string(),
                company: company.to_string(),
                release_year,
            })
            .collect()
    }
}

impl Entity for Genre {
    const STORE_KEY: &'static str = "mymanager_genres";
    const NAME: &'static str = "Genre";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn seed() -> Vec<Self> {
        let rows = [
            (1, "RPG", "Role-playing games"),
            (2, "Action", "Action-packed adventures"),
            (3, "FPS", "First-person shooters"),
            (4, "Racing", "Racing and driving games"),
            (5, "Platform", "Platform jumping games"),
            (6, "Strategy", "Strategic thinking games"),
            (7, "Sports", "Sports simulation games"),
            (8, "Puzzle", "Puzzle solving games"),
        ];
        rows.into_iter()
            .map(|(id, name, description)| Genre {
                id,
                name: name.to_string(),
                description: description.to_string(),
            })
            .collect()
    }
}

impl Entity for Order {
    const STORE_KEY: &'static str = "mymanager_orders";
    const NAME: &'static str = "Order";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn seed() -> Vec<Self> {
        let rows = [
            (1, 1, "John Doe", 1, "The Witcher 3", (2024, 1, 15), 29.99, OrderStatus::Completed),
            (2, 2, "Jane Smith", 3, "God of War", (2024, 1, 16), 39.99, OrderStatus::Completed),
            (3, 3, "Ahmed Al-Mansouri", 8, "Forza Horizon 5", (2024, 1, 17), 59.99, OrderStatus::Pending),
            (4, 4, "Marie Dubois", 6, "Elden Ring", (2024, 1, 18), 59.99, OrderStatus::Completed),
            (5, 5, "Carlos Rodriguez", 4, "Halo Infinite", (2024, 1, 19), 59.99, OrderStatus::Completed),
            (6, 6, "Yuki Tanaka", 5, "Mario Odyssey", (2024, 1, 20), 59.99, OrderStatus::Completed),
            (7, 7, "Emma Wilson", 7, "Horizon Zero Dawn", (2024, 1, 21), 19.99, OrderStatus::Pending),
            (8, 8, "Mohammed Hassan", 2, "Cyberpunk 2077", (2024, 1, 22), 49.99, OrderStatus::Completed),
            (9, 1, "John Doe", 6, "Elden Ring", (2024, 1, 23), 59.99, OrderStatus::Completed),
            (10, 2, "Jane Smith", 1, "The Witcher 3", (2024, 1, 24), 29.99, OrderStatus::Completed),
        ];
        rows.into_iter()
            .map(
                |(id, player_id, player_name, game_id, game_name, (y, m, d), amount, status)| {
                    Order {
                        id,
                        player_id,
                        player_name: player_name.to_string(),
                        game_id,
                        game_name: game_name.to_string(),
                        date: date(y, m, d),
                        amount,
                        status,
                    }
                },
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_field_names() {
        let game = Game::seed().remove(0);
        let json = serde_json::to_value(&game).unwrap();
        assert!(json.get("releaseDate").is_some());
        assert!(json.get("release_date").is_none());

        let order = Order::seed().remove(0);
        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("playerName").is_some());
        assert_eq!(json.get("status").unwrap(), "Completed");
    }

    #[test]
    fn test_seed_ids_are_unique() {
        fn assert_unique<T: Entity>() {
            let mut ids: Vec<RecordId> = T::seed().iter().map(|r| r.id()).collect();
            let before = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), before, "{} seeds repeat an id", T::NAME);
        }
        assert_unique::<Game>();
        assert_unique::<Player>();
        assert_unique::<Platform>();
        assert_unique::<Genre>();
        assert_unique::<Order>();
    }

    #[test]
    fn test_order_status_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::parse(&status.to_string()), Some(status));
        }
        assert_eq!(OrderStatus::parse("Refunded"), None);
    }
}
