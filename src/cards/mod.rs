pub mod card;
pub mod rank;
pub mod street;
pub mod suit;

pub use card::Card;
pub use rank::Rank;
pub use street::Street;
pub use suit::Suit;
