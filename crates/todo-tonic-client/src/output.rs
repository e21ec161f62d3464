//! Rendering of responses for stdout.

use serde_json::json;
use todo_tonic_core::proto::TodoItem;

pub const STREAM_DONE: &str = "server done streaming";

/// Formats responses either as plain text or as one JSON object per line.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn created(&self, item: &TodoItem) -> anyhow::Result<String> {
        if self.json {
            return Ok(json!({ "create": item }).to_string());
        }
        Ok(format!("create: {{ id: {}, text: {:?} }}", item.id, item.text))
    }

    pub fn item(&self, item: &TodoItem) -> anyhow::Result<String> {
        if self.json {
            return Ok(serde_json::to_string(item)?);
        }
        Ok(item.text.clone())
    }

    pub fn stream_done(&self) -> String {
        if self.json {
            return json!({ "done": STREAM_DONE }).to_string();
        }
        STREAM_DONE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn todo() -> TodoItem {
        TodoItem {
            id: 3,
            text: "buy \"oat\" milk".to_string(),
        }
    }

    #[test]
    fn plain_text_prints_todo_text() {
        let out = Output::new(false);
        assert_eq!(out.item(&todo()).unwrap(), "buy \"oat\" milk");
        assert_eq!(
            out.created(&todo()).unwrap(),
            r#"create: { id: 3, text: "buy \"oat\" milk" }"#
        );
        assert_eq!(out.stream_done(), STREAM_DONE);
    }

    #[test]
    fn json_lines_round_trip_the_item() {
        let out = Output::new(true);

        let item: TodoItem = serde_json::from_str(&out.item(&todo()).unwrap()).unwrap();
        assert_eq!(item, todo());

        let created: Value = serde_json::from_str(&out.created(&todo()).unwrap()).unwrap();
        assert_eq!(created["create"]["id"], 3);
        assert_eq!(created["create"]["text"], "buy \"oat\" milk");

        let done: Value = serde_json::from_str(&out.stream_done()).unwrap();
        assert_eq!(done["done"], STREAM_DONE);
    }
}
