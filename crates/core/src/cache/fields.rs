//! JSON text columns for the structured parts of [`ActDetails`].
//!
//! Each nested field is stored as its own JSON document. `None` is written as
//! `null` and `Some(vec![])` as `[]`, so the distinction survives a reload.
//! A SQL `NULL` (never written by this module) reads back as the field's
//! empty value.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Error;
use crate::models::ActDetails;

/// Encode one field, naming it in the error on failure.
pub(crate) fn encode<T: Serialize>(field: &'static str, value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|e| Error::Serialization { field, reason: format!("encode: {e}") })
}

/// Decode one field, naming it in the error on failure.
pub(crate) fn decode<T: DeserializeOwned + Default>(field: &'static str, raw: Option<&str>) -> Result<T, Error> {
    match raw {
        None => Ok(T::default()),
        Some(text) => {
            serde_json::from_str(text).map_err(|e| Error::Serialization { field, reason: format!("decode: {e}") })
        }
    }
}

/// The structured columns of an `act_details` row, as stored text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RichColumns {
    pub keywords: Option<String>,
    pub keywords_names: Option<String>,
    pub released_by: Option<String>,
    pub texts: Option<String>,
    pub references: Option<String>,
    pub authorized_body: Option<String>,
    pub directives: Option<String>,
    pub obligated: Option<String>,
    pub previous_title: Option<String>,
    pub prints: Option<String>,
}

impl RichColumns {
    pub fn encode(details: &ActDetails) -> Result<Self, Error> {
        Ok(Self {
            keywords: Some(encode("keywords", &details.keywords)?),
            keywords_names: Some(encode("keywords_names", &details.keywords_names)?),
            released_by: Some(encode("released_by", &details.released_by)?),
            texts: Some(encode("texts", &details.texts)?),
            references: Some(encode("references", &details.references)?),
            authorized_body: Some(encode("authorized_body", &details.authorized_body)?),
            directives: Some(encode("directives", &details.directives)?),
            obligated: Some(encode("obligated", &details.obligated)?),
            previous_title: Some(encode("previous_title", &details.previous_title)?),
            prints: Some(encode("prints", &details.prints)?),
        })
    }

    /// Decode every column into `details`, stopping at the first bad one.
    pub fn apply(&self, details: &mut ActDetails) -> Result<(), Error> {
        details.keywords = decode("keywords", self.keywords.as_deref())?;
        details.keywords_names = decode("keywords_names", self.keywords_names.as_deref())?;
        details.released_by = decode("released_by", self.released_by.as_deref())?;
        details.texts = decode("texts", self.texts.as_deref())?;
        details.references = decode("references", self.references.as_deref())?;
        details.authorized_body = decode("authorized_body", self.authorized_body.as_deref())?;
        details.directives = decode("directives", self.directives.as_deref())?;
        details.obligated = decode("obligated", self.obligated.as_deref())?;
        details.previous_title = decode("previous_title", self.previous_title.as_deref())?;
        details.prints = decode("prints", self.prints.as_deref())?;
        Ok(())
    }
}
