#![doc = include_str!("../README.md")]

mod card;
mod card_migration;
mod cards_client;
mod custom_lists;
mod spending_habits;
mod vault_client;

pub use card::{Benefit, BenefitType, CreditCard};
pub use card_migration::{migrate_card, FALLBACK_DAY};
pub use cards_client::{BenefitRequest, CardAddRequest, CardsClient};
pub use custom_lists::{CustomListClient, CustomListItem, CustomListKind, CustomListsClient};
pub use spending_habits::{SpendingHabit, SpendingHabitsClient};
pub use vault_client::{VaultClient, VaultClientExt};
