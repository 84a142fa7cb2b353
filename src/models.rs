use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RegisterReq {
    #[schema(example = "Ann")]
    pub name: Option<String>,
    #[schema(example = "a@x.com", format = "email")]
    pub email: Option<String>,
    /// Accepted as a string or a number
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(example = "555", value_type = String)]
    pub phone: Option<String>,
    #[schema(example = "Eng")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(example = "1234", value_type = String)]
    pub pin: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginReq {
    #[schema(example = "a@x.com", format = "email")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(example = "1234", value_type = String)]
    pub pin: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ExportQuery {
    /// `csv` or `pdf`
    #[param(example = "csv")]
    pub format: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Attendance marked successfully")]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublicUser {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "a@x.com")]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
    pub user: PublicUser,
}

fn string_or_number<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(de)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}
