use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ApiError;
use crate::utils::mailer::OutgoingMail;

/// Reads an optional field the way a browser form would send it: strings as-is,
/// numbers and booleans as their text, anything else as absent. A stray type on
/// an optional field must not sink the whole submission.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Trimmed value of a text field, or `None` when it is absent or blank.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Default, Deserialize)]
pub struct FaqRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
}

impl FaqRequest {
    pub fn into_mail(self) -> Result<OutgoingMail, ApiError> {
        let question = present(&self.question).ok_or(ApiError::Validation("Question is required"))?;
        let mut lines = vec![question.to_string()];
        if let Some(email) = present(&self.email) {
            lines.push(String::new());
            lines.push(format!("From: {}", email));
        }
        Ok(OutgoingMail::new("New FAQ Question", lines.join("\n")))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TestimonialRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// Star rating; the form sends a number but older clients send a string.
    #[serde(default, deserialize_with = "lenient_text")]
    pub rating: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl TestimonialRequest {
    pub fn into_mail(self) -> Result<OutgoingMail, ApiError> {
        let (Some(name), Some(city), Some(text)) =
            (present(&self.name), present(&self.city), present(&self.text))
        else {
            return Err(ApiError::Validation("name, city, text required"));
        };
        let rating = present(&self.rating).unwrap_or("");
        let body = [name, city, rating, "", text].join("\n");
        Ok(OutgoingMail::new("New Testimonial", body))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactRequest {
    pub fn into_mail(self) -> Result<OutgoingMail, ApiError> {
        let (Some(first_name), Some(email), Some(message)) = (
            present(&self.first_name),
            present(&self.email),
            present(&self.message),
        ) else {
            return Err(ApiError::Validation("firstName, email, message required"));
        };
        let name = format!("{} {}", first_name, present(&self.last_name).unwrap_or(""));
        let body = [
            format!("Name: {}", name.trim()),
            format!("Email: {}", email),
            String::new(),
            message.to_string(),
        ]
        .join("\n");
        Ok(OutgoingMail::new("Contact form submission", body))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WaitlistRequest {
    #[serde(default)]
    pub email: Option<String>,
}

impl WaitlistRequest {
    pub fn into_mail(self) -> Result<OutgoingMail, ApiError> {
        let email = present(&self.email).ok_or(ApiError::Validation("email required"))?;
        Ok(OutgoingMail::new(
            "Waitlist signup",
            format!("New waitlist signup:\n\nEmail: {}", email),
        ))
    }
}
