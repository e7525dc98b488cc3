use super::ResolutionBundle;
use crate::data::JsonObject;
use crate::definition::{Decoder, DefinitionTree};
use crate::error::BundleError;
use serde_json::{Map, Value as Json};

impl ResolutionBundle {
    /// Wire form: `{"definition": ..., "data": [...], "constraint"?: "..."}`.
    ///
    /// This shape may be persisted (deep links, reloads) and must stay
    /// stable. Empty data slots are written as `null`.
    pub fn encode(&self) -> Json {
        let definition = self
            .definition
            .root()
            .map(|root| self.definition.to_json(root))
            .unwrap_or(Json::Null);
        let data = self
            .data
            .iter()
            .map(|slot| slot.as_ref().map(|object| object.to_json()).unwrap_or(Json::Null))
            .collect();

        let mut encoded = Map::new();
        encoded.insert("definition".to_string(), definition);
        encoded.insert("data".to_string(), Json::Array(data));
        if let Some(constraint) = &self.constraint {
            encoded.insert("constraint".to_string(), Json::String(constraint.clone()));
        }
        Json::Object(encoded)
    }

    pub fn decode(encoded: &Json) -> Result<Self, BundleError> {
        Self::decode_with(&Decoder::default(), encoded)
    }

    /// Restores a bundle, decoding its definition with `decoder`. Data comes
    /// back as [`JsonObject`]s.
    pub fn decode_with(decoder: &Decoder, encoded: &Json) -> Result<Self, BundleError> {
        let fields = encoded.as_object().ok_or(BundleError::InvalidField {
            field: "bundle",
            message: "expected a JSON object".to_string(),
        })?;

        let definition = match fields.get("definition") {
            None => return Err(BundleError::MissingField("definition")),
            Some(Json::Null) => DefinitionTree::new(),
            Some(spec) => decoder.decode(spec.clone())?,
        };

        let data = match fields.get("data") {
            None => return Err(BundleError::MissingField("data")),
            Some(items @ Json::Array(_)) => JsonObject::slots_from_json(items.clone()),
            Some(other) => {
                return Err(BundleError::InvalidField {
                    field: "data",
                    message: format!("expected an array, found {}", other),
                });
            }
        };

        let constraint = match fields.get("constraint") {
            None | Some(Json::Null) => None,
            Some(Json::String(constraint)) => Some(constraint.clone()),
            Some(other) => {
                return Err(BundleError::InvalidField {
                    field: "constraint",
                    message: format!("expected a string, found {}", other),
                });
            }
        };

        Ok(Self {
            definition,
            data,
            constraint,
        })
    }
}
