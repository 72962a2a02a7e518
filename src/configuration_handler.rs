use crate::configuration::Configuration;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "web_cafe", about = "Cafe website backend")]
pub struct ConfigurationHandler {
    #[arg(long, env = "PORT", default_value = "3000")]
    port: String,

    /// Without a database URL the server runs on the in-memory store
    /// (records do not survive a restart).
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(long, env = "ADMIN_PASSWORD", default_value = "123")]
    admin_password: String,

    #[arg(long, env = "WEBSITE_TITLE", default_value = "WebCafe")]
    website_title: String,

    #[arg(long, env = "FRONTEND_PATH", default_value = "../frontend/index.html")]
    frontend_path: PathBuf,

    #[arg(long, env = "MAIL_FROM", default_value = "webcafe@example.com")]
    mail_from: String,

    #[arg(long, env = "CONTACT_RECIPIENT", default_value = "webcafe@example.com")]
    contact_recipient: String,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn website_title(&self) -> String {
        self.website_title.clone()
    }

    fn admin_password(&self) -> String {
        self.admin_password.clone()
    }

    fn frontend_path(&self) -> PathBuf {
        self.frontend_path.clone()
    }

    fn port(&self) -> String {
        self.port.clone()
    }

    fn database_url(&self) -> Option<String> {
        self.database_url.clone()
    }

    fn mail_from(&self) -> String {
        self.mail_from.clone()
    }

    fn contact_recipient(&self) -> String {
        self.contact_recipient.clone()
    }
}
