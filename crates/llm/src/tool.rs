use rig::completion::ToolDefinition;
use serde_json::json;

/// Name of the only function the model may call.
pub const LOG_TICKET_TOOL_NAME: &str = "logTicket";

pub const LOG_TICKET_ISSUE_ARG: &str = "issue";
pub const LOG_TICKET_PRIORITY_ARG: &str = "priority";
pub const LOG_TICKET_USER_NAME_ARG: &str = "user_name";

const LOG_TICKET_DESCRIPTION: &str = "Log a customer support ticket to Google Sheets when a user reports an issue that needs tracking.";

/// Declaration sent with every session.
///
/// `priority` stays free-form at the protocol level even though the UI only
/// distinguishes a few labels.
pub fn log_ticket_tool() -> ToolDefinition {
    ToolDefinition {
        name: LOG_TICKET_TOOL_NAME.to_string(),
        description: LOG_TICKET_DESCRIPTION.to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                (LOG_TICKET_ISSUE_ARG): {
                    "type": "string",
                    "description": "The specific issue reported by the user."
                },
                (LOG_TICKET_PRIORITY_ARG): {
                    "type": "string",
                    "description": "Priority level: Login/Critical/Normal."
                },
                (LOG_TICKET_USER_NAME_ARG): {
                    "type": "string",
                    "description": "Name of the user if provided, else 'Unknown'."
                }
            },
            "required": [LOG_TICKET_ISSUE_ARG, LOG_TICKET_PRIORITY_ARG]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_three_string_parameters_with_two_required() {
        let tool = log_ticket_tool();

        assert_eq!(tool.name, "logTicket");
        assert!(tool.description.contains("support ticket"));

        let properties = tool.parameters["properties"]
            .as_object()
            .expect("properties object");
        assert_eq!(properties.len(), 3);
        for name in ["issue", "priority", "user_name"] {
            assert_eq!(properties[name]["type"], "string", "{name} must be a string");
        }

        assert_eq!(tool.parameters["required"], json!(["issue", "priority"]));
    }

    #[test]
    fn priority_is_not_constrained_to_an_enumeration() {
        let tool = log_ticket_tool();

        assert!(tool.parameters["properties"]["priority"].get("enum").is_none());
    }
}
