use serde::{Deserialize, Serialize};

use super::{Act, nullable};

/// Full record of a single act.
///
/// The list-shaped fields are optional: the registry sends `null` or omits
/// them for some acts, and that is kept apart from an explicit empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct ActDetails {
    #[serde(rename = "ELI", deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub status: String,
    #[serde(rename = "promulgation", deserialize_with = "nullable")]
    pub published: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub address: String,
    #[serde(rename = "displayAddress", deserialize_with = "nullable")]
    pub display_address: String,
    #[serde(rename = "pos", deserialize_with = "nullable")]
    pub position: u32,
    #[serde(deserialize_with = "nullable")]
    pub year: i32,
    #[serde(rename = "announcementDate", deserialize_with = "nullable")]
    pub announcement_date: String,
    #[serde(rename = "changeDate", deserialize_with = "nullable")]
    pub change_date: String,
    #[serde(deserialize_with = "nullable")]
    pub publisher: String,
    #[serde(rename = "textHTML", deserialize_with = "nullable")]
    pub text_html: bool,
    #[serde(rename = "textPDF", deserialize_with = "nullable")]
    pub text_pdf: bool,
    #[serde(deserialize_with = "nullable")]
    pub volume: u32,
    #[serde(rename = "entryIntoForce", deserialize_with = "nullable")]
    pub entry_into_force: String,
    #[serde(rename = "inForce", deserialize_with = "nullable")]
    pub in_force: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(rename = "keywordsNames", skip_serializing_if = "Option::is_none")]
    pub keywords_names: Option<Vec<String>>,
    #[serde(rename = "releasedBy", skip_serializing_if = "Option::is_none")]
    pub released_by: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texts: Option<Vec<Text>>,
    #[serde(deserialize_with = "nullable")]
    pub references: References,
    #[serde(rename = "authorizedBody", skip_serializing_if = "Option::is_none")]
    pub authorized_body: Option<Vec<String>>,
    /// Shape is not fixed by the registry; kept verbatim.
    pub directives: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obligated: Option<Vec<String>>,
    #[serde(rename = "previousTitle", skip_serializing_if = "Option::is_none")]
    pub previous_title: Option<Vec<String>>,
    /// Shape is not fixed by the registry; kept verbatim.
    pub prints: serde_json::Value,
}

impl ActDetails {
    /// The summary view of this act, as it would appear in a year listing.
    pub fn summary(&self) -> Act {
        Act {
            id: self.id.clone(),
            title: self.title.clone(),
            status: self.status.clone(),
            published: self.published.clone(),
            position: self.position,
            year: self.year,
            kind: self.kind.clone(),
            address: self.address.clone(),
        }
    }
}

/// A published text version of an act.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct Text {
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Known text version codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// `O`: tekst oryginalny.
    Original,
    /// `I`: tekst ujednolicony.
    Consolidated,
    /// `T`: tłumaczenie.
    Translation,
    /// `U`: tłumaczenie nieoficjalne.
    UnofficialTranslation,
}

impl TextKind {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "O" => Some(Self::Original),
            "I" => Some(Self::Consolidated),
            "T" => Some(Self::Translation),
            "U" => Some(Self::UnofficialTranslation),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Original => "Tekst oryginalny",
            Self::Consolidated => "Tekst ujednolicony",
            Self::Translation => "Tłumaczenie",
            Self::UnofficialTranslation => "Tłumaczenie nieoficjalne",
        }
    }
}

impl Text {
    /// Decoded version code, `None` for codes the registry may add later.
    pub fn text_kind(&self) -> Option<TextKind> {
        TextKind::from_code(&self.kind)
    }
}

/// Cross-references to related acts, grouped by relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct References {
    #[serde(rename = "Akty uznane za uchylone", skip_serializing_if = "Option::is_none")]
    pub repealed_acts: Option<Vec<Reference>>,
    #[serde(rename = "Akty zmieniające", skip_serializing_if = "Option::is_none")]
    pub amending_acts: Option<Vec<Reference>>,
    #[serde(rename = "Podstawa prawna", skip_serializing_if = "Option::is_none")]
    pub legal_basis: Option<Vec<Reference>>,
    #[serde(rename = "Podstawa prawna z art.", skip_serializing_if = "Option::is_none")]
    pub legal_basis_with_art: Option<Vec<Reference>>,
    #[serde(rename = "Tekst jednolity dla aktu", skip_serializing_if = "Option::is_none")]
    pub consolidated_text_for: Option<Vec<Reference>>,
    #[serde(rename = "Inf. o tekście jednolitym", skip_serializing_if = "Option::is_none")]
    pub consolidated_text_notice: Option<Vec<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct Reference {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub art: Option<String>,
}
