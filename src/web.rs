//! Single-page web form over the same predictor the CLI uses.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::config;
use crate::error::{Error, Result};
use crate::predictor::{Prediction, Predictor, parse_price};

pub const MIN_PRICE: f64 = 100.0;
pub const MAX_PRICE: f64 = 5000.0;
pub const DEFAULT_PRICE: f64 = 500.0;
pub const PRICE_STEP: f64 = 50.0;

/// Shown for failures the user cannot fix by editing the form.
const GENERIC_FAILURE: &str = "Something went wrong while predicting. Please try again.";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub encoder_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: config::WEB_HOST.to_string(),
            port: config::WEB_PORT,
            model_path: config::MODEL_PATH.into(),
            encoder_path: config::ENCODER_PATH.into(),
        }
    }
}

/// Shared, read-only state. `predictor` is `None` when the artifacts could not be loaded.
pub struct AppState {
    pub predictor: Option<Predictor>,
    pub load_error: Option<String>,
}

impl AppState {
    /// State for a predictor that is already loaded.
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor: Some(predictor),
            load_error: None,
        }
    }

    /// Loads artifacts once; failure is remembered and shown on every page.
    pub fn load(config: &ServerConfig) -> Self {
        match Predictor::load(&config.model_path, &config.encoder_path) {
            Ok(predictor) => Self::new(predictor),
            Err(e) => {
                warn!(error = %e, "artifacts unavailable, serving error page");
                Self {
                    predictor: None,
                    load_error: Some(e.to_string()),
                }
            }
        }
    }
}

/// Posted form fields. Both are optional so a partial post still gets the page back.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PredictForm {
    pub price: Option<String>,
    pub color: Option<String>,
}

enum Outcome {
    Verdict(Prediction),
    Failure(String),
}

/// `GET /`, `POST /predict` and `GET /health` over the shared state.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state, DEFAULT_PRICE, None, None))
}

async fn predict(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PredictForm>,
) -> Html<String> {
    let Some(predictor) = state.predictor.as_ref() else {
        return Html(render_page(&state, DEFAULT_PRICE, None, None));
    };

    let (price, outcome) = match evaluate(predictor, &form) {
        Ok((price, prediction)) => (price, Outcome::Verdict(prediction)),
        Err(e) => (DEFAULT_PRICE, Outcome::Failure(failure_message(&e))),
    };
    let selected = form.color.as_deref();
    Html(render_page(&state, price, selected, Some(outcome)))
}

/// Validates the posted fields and runs the model on them.
fn evaluate(predictor: &Predictor, form: &PredictForm) -> Result<(f64, Prediction)> {
    let raw_price = form.price.as_deref().ok_or(Error::MissingField("price"))?;
    let color = form.color.as_deref().ok_or(Error::MissingField("color"))?;

    let price = parse_price(raw_price)?;
    if !(MIN_PRICE..=MAX_PRICE).contains(&price) {
        return Err(Error::PriceOutOfRange {
            price,
            min: MIN_PRICE,
            max: MAX_PRICE,
        });
    }
    Ok((price, predictor.predict(price, color)?))
}

/// Text for the error panel. Only recoverable errors are shown verbatim.
fn failure_message(e: &Error) -> String {
    if e.is_recoverable() {
        format!("Error: {e}")
    } else {
        error!(error = %e, "prediction failed");
        GENERIC_FAILURE.to_string()
    }
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let status = if state.predictor.is_some() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(json!({
            "model_loaded": state.predictor.is_some(),
            "error": state.load_error,
        })),
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Verdict(p) if p.liked => format!(
            "<div class=\"result success\"><h3>✅ SUCCESS! This item will likely be LOVED.</h3>\
             <p>Confidence Score: <b>{:.1}%</b></p></div>",
            p.confidence() * 100.0
        ),
        Outcome::Verdict(p) => format!(
            "<div class=\"result failure\"><h3>❌ PASS. This item might not sell well.</h3>\
             <p>Confidence Score: <b>{:.1}%</b> (likelihood of dislike)</p></div>",
            p.confidence() * 100.0
        ),
        Outcome::Failure(msg) => format!(
            r#"<div class="result failure"><p>{}</p></div>"#,
            escape_html(msg)
        ),
    }
}

fn render_form(predictor: &Predictor, price: f64, selected: Option<&str>) -> String {
    let options: String = predictor
        .known_colors()
        .iter()
        .map(|c| {
            let sel = if Some(c.as_str()) == selected {
                " selected"
            } else {
                ""
            };
            let c = escape_html(c);
            format!(r#"<option value="{c}"{sel}>{c}</option>"#)
        })
        .collect();
    format!(
        r#"<form method="post" action="/predict">
<label>Price (₹) <input type="number" name="price"
  min="{MIN_PRICE}" max="{MAX_PRICE}" step="{PRICE_STEP}" value="{price}"></label>
<label>Color <select name="color">{options}</select></label>
<button type="submit">Predict User Reaction</button>
</form>"#
    )
}

fn render_sidebar(state: &AppState) -> String {
    let accuracy = state
        .predictor
        .as_ref()
        .and_then(|p| p.model().accuracy())
        .map(|a| format!("<br><b>Accuracy:</b> {:.0}%", a * 100.0))
        .unwrap_or_default();
    format!(
        "<aside><h4>Project Info</h4><p><b>Model:</b> Logistic Regression\
         <br><b>Data:</b> Synthetic Kids Fashion Data\
         <br><b>Features:</b> price, color{accuracy}</p></aside>"
    )
}

const STYLE: &str = "body{font-family:sans-serif;display:flex;gap:2rem;margin:2rem}main{flex:1}\
aside{width:16rem;background:#eef4fb;padding:1rem;border-radius:6px}\
.result{margin-top:1rem;padding:1rem;border-radius:6px}\
.success{background:#e3f6e8}.failure{background:#fbe5e5}";

fn render_page(
    state: &AppState,
    price: f64,
    selected: Option<&str>,
    outcome: Option<Outcome>,
) -> String {
    let body = match (&state.predictor, &state.load_error) {
        (Some(predictor), _) => {
            let result = outcome.as_ref().map(render_outcome).unwrap_or_default();
            format!("{}{}", render_form(predictor, price, selected), result)
        }
        (None, err) => format!(
            "<div class=\"result failure\"><p>❌ Model not found! \
             Please run <code>train_model</code> first.</p><p>{}</p></div>",
            escape_html(err.as_deref().unwrap_or_default())
        ),
    };
    let sidebar = render_sidebar(state);
    format!(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Myntra Junior AI</title><style>{STYLE}</style></head>
<body><main><h1>👕 Myntra Junior: AI Designer Helper</h1>
<p>Use this tool to predict if a new <b>Kids T-Shirt</b> will be a Hit or a Miss.</p>
{body}</main>{sidebar}</body></html>"#
    )
}

/// Binds and serves until ctrl+c.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::load(&config));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(url = %format!("http://{addr}"), "web app listening");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl+c");
        }
        info!("shutdown signal received");
    };
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
