use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt, str::FromStr};
use validator::{Validate, ValidationError};

/// Platform a mobile client is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientType {
    #[serde(rename = "android")]
    Android,
    #[serde(rename = "iOS")]
    Ios,
    #[serde(rename = "cordova")]
    Cordova,
    #[serde(rename = "xamarin")]
    Xamarin,
}

impl ClientType {
    pub const ALL: [ClientType; 4] = [
        ClientType::Android,
        ClientType::Ios,
        ClientType::Cordova,
        ClientType::Xamarin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Android => "android",
            ClientType::Ios => "iOS",
            ClientType::Cordova => "cordova",
            ClientType::Xamarin => "xamarin",
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownClientType(pub String);

impl fmt::Display for UnknownClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported client type '{}', expected one of: android, iOS, cordova, xamarin",
            self.0
        )
    }
}

impl std::error::Error for UnknownClientType {}

impl FromStr for ClientType {
    type Err = UnknownClientType;

    // Matching is case sensitive: "ios" is not "iOS".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClientType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownClientType(s.to_string()))
    }
}

fn validate_client_type(value: &str) -> Result<(), ValidationError> {
    match value.parse::<ClientType>() {
        Ok(_) => Ok(()),
        Err(e) => {
            let mut error = ValidationError::new("oneof");
            error.message = Some(Cow::Owned(e.to_string()));
            Err(error)
        }
    }
}

/// Body of the create request.
///
/// `client_type` stays a plain string on the wire so that an unknown platform
/// is reported as a validation failure on `clientType` rather than as an
/// unparseable body. `name` must be unique per namespace and can not be
/// changed later. Absent fields default to empty so that a missing value is
/// reported by validation with the field named.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MobileAppCreateRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[serde(rename = "clientType")]
    #[validate(custom = "validate_client_type")]
    pub client_type: String,

    #[serde(rename = "appIdentifier")]
    #[validate(length(min = 1, message = "appIdentifier is required"))]
    pub app_identifier: String,

    #[serde(rename = "dmzUrl", skip_serializing_if = "Option::is_none")]
    pub dmz_url: Option<String>,
}

impl MobileAppCreateRequest {
    /// Parsed platform. Only meaningful once the request validated.
    pub fn parsed_client_type(&self) -> Result<ClientType, UnknownClientType> {
        self.client_type.parse()
    }
}

/// Body of the update request. Only the app identifier is mutable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MobileAppUpdateRequest {
    #[serde(rename = "appIdentifier")]
    #[validate(length(min = 1, message = "appIdentifier is required"))]
    pub app_identifier: String,
}
