//! Authentication challenges and their scripted resolutions.

use std::fmt;

use super::response::Response;

/// Authentication scheme requested by a protection space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthenticationMethod {
    #[default]
    Default,
    HttpBasic,
    HttpDigest,
    HtmlForm,
    Negotiate,
    Ntlm,
    ClientCertificate,
    ServerTrust,
}

/// Where a challenge comes from: host, port, protocol and realm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectionSpace {
    pub host: String,
    pub port: u16,
    pub protocol: Option<String>,
    pub realm: Option<String>,
    pub authentication_method: AuthenticationMethod,
}

impl ProtectionSpace {
    /// Create a protection space for an HTTPS host with the default method.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            protocol: Some("https".to_string()),
            realm: None,
            authentication_method: AuthenticationMethod::Default,
        }
    }

    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn with_method(mut self, method: AuthenticationMethod) -> Self {
        self.authentication_method = method;
        self
    }
}

/// How long a credential is kept by the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CredentialPersistence {
    None,
    #[default]
    ForSession,
    Permanent,
}

/// A user/password credential.
///
/// The password is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub user: String,
    pub password: String,
    pub persistence: CredentialPersistence,
}

impl Credential {
    /// Create a credential kept for the session.
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            persistence: CredentialPersistence::ForSession,
        }
    }

    pub fn with_persistence(mut self, persistence: CredentialPersistence) -> Self {
        self.persistence = persistence;
        self
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("persistence", &self.persistence)
            .finish()
    }
}

/// One authentication negotiation step injected into a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthChallenge {
    pub protection_space: ProtectionSpace,
    /// Credential the stack proposes, if it has one cached
    pub proposed_credential: Option<Credential>,
    /// How many times authentication already failed for this space
    pub previous_failure_count: u32,
    /// Response that triggered the challenge, e.g. a 401
    pub failure_response: Option<Response>,
}

impl AuthChallenge {
    pub fn new(protection_space: ProtectionSpace) -> Self {
        Self {
            protection_space,
            proposed_credential: None,
            previous_failure_count: 0,
            failure_response: None,
        }
    }

    pub fn with_proposed_credential(mut self, credential: Credential) -> Self {
        self.proposed_credential = Some(credential);
        self
    }

    pub fn with_previous_failure_count(mut self, count: u32) -> Self {
        self.previous_failure_count = count;
        self
    }

    pub fn with_failure_response(mut self, response: Response) -> Self {
        self.failure_response = Some(response);
        self
    }
}

/// Resolution choice for a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    UseCredential,
    PerformDefaultHandling,
    CancelAuthenticationChallenge,
    RejectProtectionSpace,
}

impl Disposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::UseCredential => "use-credential",
            Disposition::PerformDefaultHandling => "perform-default",
            Disposition::CancelAuthenticationChallenge => "cancel",
            Disposition::RejectProtectionSpace => "reject-protection-space",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A canned resolution for one challenge.
///
/// A credential is carried exactly when the disposition is
/// [`Disposition::UseCredential`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthChallengeResponse {
    UseCredential(Credential),
    PerformDefaultHandling,
    Cancel,
    RejectProtectionSpace,
}

impl AuthChallengeResponse {
    pub fn disposition(&self) -> Disposition {
        match self {
            AuthChallengeResponse::UseCredential(_) => Disposition::UseCredential,
            AuthChallengeResponse::PerformDefaultHandling => Disposition::PerformDefaultHandling,
            AuthChallengeResponse::Cancel => Disposition::CancelAuthenticationChallenge,
            AuthChallengeResponse::RejectProtectionSpace => Disposition::RejectProtectionSpace,
        }
    }

    pub fn credential(&self) -> Option<&Credential> {
        match self {
            AuthChallengeResponse::UseCredential(credential) => Some(credential),
            _ => None,
        }
    }
}
