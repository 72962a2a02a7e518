use tracing::info;

/// Mail delivery collaborator. A failed send must never take the caller
/// down with it; handlers decide per flow whether a failure is surfaced.
pub trait Mailer: Clone + Send + Sync + 'static {
    fn send(&self, subject: &str, body: &str, from: &str, to: &[String]) -> Result<(), String>;
}

/// Writes outgoing mail to the log instead of delivering it. Stands in for
/// a real transport in local runs, the same way the in-memory store stands
/// in for the database.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, subject: &str, body: &str, from: &str, to: &[String]) -> Result<(), String> {
        info!(subject, from, to = ?to, "outgoing mail:\n{body}");
        Ok(())
    }
}
