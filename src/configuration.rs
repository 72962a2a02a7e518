use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn website_title(&self) -> String;
    fn admin_password(&self) -> String;
    fn frontend_path(&self) -> PathBuf;
    fn port(&self) -> String;
    fn database_url(&self) -> Option<String>;
    /// Sender address for all outgoing mail.
    fn mail_from(&self) -> String;
    /// Where contact form messages end up.
    fn contact_recipient(&self) -> String;
}
