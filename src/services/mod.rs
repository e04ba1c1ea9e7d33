pub mod database;
pub mod mailer;

pub use database::PortfolioDb;
pub use mailer::{ContactEmail, Mailer, MailerError, MockMailer, SmtpMailer};
