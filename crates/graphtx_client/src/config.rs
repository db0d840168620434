//! Connection configuration.

/// Connection parameters for a transactional endpoint.
///
/// Construction-time only; not mutable once the client is running.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server host name or address.
    pub host: String,
    /// URL scheme, `http` or `https`.
    pub protocol: String,
    /// Server port.
    pub port: u16,
    /// Basic-auth username.
    pub username: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
}

impl ClientConfig {
    /// Creates a configuration for the given host with default protocol
    /// and port.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            protocol: "http".into(),
            port: 7474,
            username: None,
            password: None,
        }
    }

    /// Sets the URL scheme.
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets basic-auth credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// The auto-commit endpoint.
    pub fn commit_endpoint(&self) -> String {
        format!(
            "{}://{}:{}/db/data/transaction/commit",
            self.protocol, self.host, self.port
        )
    }

    /// The transaction-open endpoint.
    pub fn transaction_endpoint(&self) -> String {
        format!(
            "{}://{}:{}/db/data/transaction",
            self.protocol, self.host, self.port
        )
    }

    /// Active credentials, present only when both username and password
    /// are configured.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("127.0.0.1")
    }
}

/// HTTP Basic credentials handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}
