use std::sync::OnceLock;

use minijinja::{Environment, context};

use crate::error::FaersError;
use crate::sources::openfda::EVENT_PAGE_SIZE;

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

#[derive(serde::Serialize)]
struct EndpointRow {
    path: &'static str,
    params: &'static str,
    summary: &'static str,
}

const ENDPOINTS: &[EndpointRow] = &[
    EndpointRow {
        path: "/events",
        params: "drug, serious",
        summary: "Raw adverse-event reports from openFDA",
    },
    EndpointRow {
        path: "/manufacturers",
        params: "drug, seriousness",
        summary: "Report counts per manufacturer of the drug",
    },
    EndpointRow {
        path: "/trends",
        params: "drug",
        summary: "Report counts per month of receipt",
    },
];

fn env() -> Result<&'static Environment<'static>, FaersError> {
    if let Some(env) = ENV.get() {
        return Ok(env);
    }

    let mut env = Environment::new();
    env.add_template(
        "index.html.j2",
        include_str!("../../templates/index.html.j2"),
    )?;

    let _ = ENV.set(env);
    ENV.get().ok_or_else(|| FaersError::Api {
        api: "templates".into(),
        message: "Template environment initialization race".into(),
    })
}

pub fn homepage() -> Result<String, FaersError> {
    let tmpl = env()?.get_template("index.html.j2")?;
    Ok(tmpl.render(context! {
        version => env!("CARGO_PKG_VERSION"),
        page_size => EVENT_PAGE_SIZE,
        endpoints => ENDPOINTS,
    })?)
}
