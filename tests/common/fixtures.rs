use formexpr::ExpressionContext;
use serde_json::json;

use super::context_from;

/// A vehicle inspection form midway through being filled in.
pub fn vehicle_form() -> ExpressionContext {
    context_from(json!({
        "ctx": {
            "vehicle": {
                "mileage": 150000,
                "make": "Volvo",
                "vin": null,
                "fuel": "diesel",
                "tags": ["awd", "towbar"]
            },
            "owner": { "name": "Ada", "nickname": "" },
            "items": [],
            "wizard": { "step": 2 }
        },
        "fields": {
            "vin": { "value": "YV1LZ", "valid": true },
            "email": { "value": "", "valid": false, "error": "Required" },
            "notes": { "value": null, "valid": true, "touched": false }
        }
    }))
}

/// `{ ctx: {}, fields: {} }`
pub fn empty_context() -> ExpressionContext {
    ExpressionContext::default()
}
