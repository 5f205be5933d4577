use super::Rows;
use serde::Deserialize;
use serde_json::Value;

/// The `ValueRange` document shared by the Sheets REST API and the `gog` CLI.
#[derive(Debug, Deserialize)]
pub(crate) struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Vec<Value>>>,
}

impl ValueRange {
    pub(crate) fn into_rows(self) -> Rows {
        self.values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect()
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_non_string_cells_as_text() {
        let payload: ValueRange = serde_json::from_str(
            r#"{"range":"Sheet1!A1:C2","values":[["Title","Count"],["Engineer",2,null,true]]}"#,
        )
        .expect("payload parses");

        assert_eq!(
            payload.into_rows(),
            vec![
                vec!["Title".to_string(), "Count".to_string()],
                vec![
                    "Engineer".to_string(),
                    "2".to_string(),
                    String::new(),
                    "true".to_string()
                ],
            ]
        );
    }

    #[test]
    fn missing_values_means_no_rows() {
        let payload: ValueRange =
            serde_json::from_str(r#"{"range":"Sheet1!A1:C2","majorDimension":"ROWS"}"#)
                .expect("payload parses");
        assert!(payload.into_rows().is_empty());
    }
}
