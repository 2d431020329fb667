// Item-level parameters with node-level defaults

use serde_json::Value;

use gemini_voice_types::models::{
    PARAM_ENABLE_GROUNDING, PARAM_MODEL_NAME, PARAM_PROMPT, PARAM_VOICE_NAME,
};
use gemini_voice_types::{InputItem, ItemDefaults};

use crate::ports::ParameterSource;

/// Resolves parameters from the item's own json first, then from defaults.
///
/// An explicit `null` in the item counts as unset.
#[derive(Debug, Clone, Default)]
pub struct ItemParameters {
    items: Vec<InputItem>,
    defaults: ItemDefaults,
}

impl ItemParameters {
    pub fn new(items: Vec<InputItem>, defaults: ItemDefaults) -> Self {
        Self { items, defaults }
    }

    pub fn items(&self) -> &[InputItem] {
        &self.items
    }

    fn default_value(&self, name: &str) -> Option<Value> {
        match name {
            PARAM_PROMPT => self.defaults.prompt.clone().map(Value::String),
            PARAM_MODEL_NAME => Some(Value::String(self.defaults.model_name.clone())),
            PARAM_VOICE_NAME => Some(Value::String(self.defaults.voice_name.clone())),
            PARAM_ENABLE_GROUNDING => Some(Value::Bool(self.defaults.enable_grounding)),
            _ => None,
        }
    }
}

impl ParameterSource for ItemParameters {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn get(&self, name: &str, item_index: usize) -> Option<Value> {
        self.items
            .get(item_index)
            .and_then(|item| item.json.get(name))
            .filter(|value| !value.is_null())
            .cloned()
            .or_else(|| self.default_value(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parameters() -> ItemParameters {
        let defaults = ItemDefaults {
            prompt: Some("default prompt".to_string()),
            voice_name: "Charon".to_string(),
            ..ItemDefaults::default()
        };
        ItemParameters::new(
            vec![
                InputItem::from_value(json!({"prompt": "own", "voiceName": null})),
                InputItem::from_value(json!({"enableGrounding": true})),
            ],
            defaults,
        )
    }

    #[test]
    fn test_item_value_overrides_default() {
        assert_eq!(parameters().get(PARAM_PROMPT, 0), Some(json!("own")));
        assert_eq!(parameters().get(PARAM_ENABLE_GROUNDING, 1), Some(json!(true)));
    }

    #[test]
    fn test_defaults_fill_gaps() {
        let params = parameters();
        assert_eq!(params.get(PARAM_PROMPT, 1), Some(json!("default prompt")));
        assert_eq!(params.get(PARAM_VOICE_NAME, 0), Some(json!("Charon")));
        assert_eq!(params.get(PARAM_ENABLE_GROUNDING, 0), Some(json!(false)));
    }

    #[test]
    fn test_item_count_follows_items() {
        assert_eq!(parameters().item_count(), 2);
        assert_eq!(ItemParameters::default().item_count(), 0);
    }

    #[test]
    fn test_unknown_parameter_and_index() {
        assert_eq!(parameters().get("temperature", 0), None);
        assert_eq!(parameters().get(PARAM_PROMPT, 9), Some(json!("default prompt")));
    }
}
