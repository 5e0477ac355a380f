pub use super::accounts::Entity as Accounts;
pub use super::users::Entity as Users;
