/// One parsed DNS lookup from the resolver log.
///
/// Exists only for lines that matched the structural query pattern; a
/// malformed line never produces a partial event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryEvent {
    /// Source record timestamp, passed through unreformatted.
    pub timestamp: String,
    pub client_ip: String,
    pub query_type: String,
    pub domain: String,
    pub level: String,
}
