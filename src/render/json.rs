use serde::Serialize;

use crate::error::FaersError;

pub fn to_pretty<T: Serialize>(value: &T) -> Result<String, FaersError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::to_pretty;
    use crate::entities::manufacturer::ManufacturersResponse;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Demo<'a> {
        drug: &'a str,
        reports: usize,
    }

    #[test]
    fn to_pretty_serializes_with_indentation() {
        let payload = Demo {
            drug: "aspirin",
            reports: 100,
        };
        let json = to_pretty(&payload).expect("json");
        assert!(json.contains('\n'));
        assert!(json.contains("\"drug\": \"aspirin\""));
        assert!(json.contains("\"reports\": 100"));
    }

    #[test]
    fn json_render_manufacturer_pairs() {
        let response = ManufacturersResponse {
            manufacturers: vec![("Acme".to_string(), 3), ("Unknown".to_string(), 4)],
        };

        let json = to_pretty(&response).expect("manufacturers json");
        assert!(json.contains("\"manufacturers\""));
        assert!(json.contains("\"Acme\",\n"));
    }
}
