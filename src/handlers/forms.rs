//! Urlencoded form bodies read as raw key/value pairs.
//!
//! `serde_urlencoded` cannot collect a repeated key (`genres=Jazz&genres=Folk`) into a
//! struct field, so handlers extract `Form<Vec<(String, String)>>` and convert it here.

use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    services::{parse_start_time, ArtistInput, ShowInput, VenueInput},
};

/// Body of the venue and artist search forms.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: Option<String>,
}

/// Submitted form fields, in submission order.
#[derive(Debug, Clone, Default)]
pub struct FormFields(Vec<(String, String)>);

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

impl FormFields {
    /// First non-blank value for `key`, trimmed.
    pub fn get(&self, key: &str) -> Option<String> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Every non-blank value for `key`, in order.
    pub fn get_all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn required(&self, key: &str) -> Result<String> {
        self.get(key)
            .ok_or_else(|| AppError::Validation(format!("The {} field is required.", key)))
    }

    /// Checkbox semantics: present with any value other than an explicit "no" means checked.
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "n" | "no" | "false" | "0" | "off"),
            None => false,
        }
    }

    fn integer(&self, key: &str) -> Result<i32> {
        let raw = self.required(key)?;
        raw.parse()
            .map_err(|_| AppError::Validation(format!("The {} field must be a number, got {:?}.", key, raw)))
    }
}

/// Lenient: a blank name is kept empty so a failed submission can be re-rendered as typed.
impl From<&FormFields> for VenueInput {
    fn from(fields: &FormFields) -> Self {
        Self {
            name: fields.get("name").unwrap_or_default(),
            city: fields.get("city"),
            state: fields.get("state"),
            address: fields.get("address"),
            phone: fields.get("phone"),
            image_link: fields.get("image_link"),
            website: fields.get("website"),
            facebook_link: fields.get("facebook_link"),
            seeking_talent: fields.flag("seeking_talent"),
            seeking_description: fields.get("seeking_description"),
            genres: fields.get_all("genres"),
        }
    }
}

impl From<&FormFields> for ArtistInput {
    fn from(fields: &FormFields) -> Self {
        Self {
            name: fields.get("name").unwrap_or_default(),
            city: fields.get("city"),
            state: fields.get("state"),
            phone: fields.get("phone"),
            image_link: fields.get("image_link"),
            website: fields.get("website"),
            facebook_link: fields.get("facebook_link"),
            seeking_venue: fields.flag("seeking_venue"),
            seeking_description: fields.get("seeking_description"),
            genres: fields.get_all("genres"),
        }
    }
}

impl TryFrom<&FormFields> for ShowInput {
    type Error = AppError;

    fn try_from(fields: &FormFields) -> Result<Self> {
        let raw_start = fields.required("start_time")?;
        let start_time = parse_start_time(&raw_start).map_err(|_| {
            AppError::Validation(format!(
                "Start time {:?} is not in the YYYY-MM-DD HH:MM:SS format.",
                raw_start
            ))
        })?;

        Ok(Self {
            artist_id: fields.integer("artist_id")?,
            venue_id: fields.integer("venue_id")?,
            start_time,
        })
    }
}
