//! Base controllers shared by every tenant.

use serde_json::json;
use thub_kernel::dispatch::{ActionContext, ActionOutcome, Controller, DispatchError};

fn page_model(context: &ActionContext) -> serde_json::Value {
    json!({
        "application": context.tenant.application_name(),
        "script": context.tenant.script_asset("site"),
        "style": context.tenant.style_asset("site"),
    })
}

/// Landing pages of the application.
#[derive(Debug, Default)]
pub struct HomeController;

impl Controller for HomeController {
    fn invoke(&self, action: &str, context: &ActionContext) -> Result<ActionOutcome, DispatchError> {
        let mut model = page_model(context);
        match action {
            "index" => Ok(ActionOutcome::view("index", model)),
            "list" => {
                model["items"] = context
                    .args
                    .iter()
                    .map(|arg| format!("<li>{arg}</li>"))
                    .collect::<String>()
                    .into();
                Ok(ActionOutcome::view("list", model))
            },
            "detail" => {
                model["subject"] =
                    context.args.first().cloned().unwrap_or_else(|| "unknown".to_owned()).into();
                Ok(ActionOutcome::view("detail", model))
            },
            "search" => Ok(ActionOutcome::view("search", model)),
            "notification" => {
                model["message"] = "No new notifications".into();
                Ok(ActionOutcome::view("_notification", model))
            },
            _ => Ok(ActionOutcome::NotFound),
        }
    }
}

/// Sign-in, sign-out, and registration pages.
#[derive(Debug, Default)]
pub struct AccountController;

impl Controller for AccountController {
    fn invoke(&self, action: &str, context: &ActionContext) -> Result<ActionOutcome, DispatchError> {
        let model = page_model(context);
        match action {
            "login" => Ok(ActionOutcome::view("login", model)),
            "logout" => Ok(ActionOutcome::view("logout", model)),
            "register" => Ok(ActionOutcome::view("register", model)),
            _ => Ok(ActionOutcome::NotFound),
        }
    }
}
