//! Remote automation client.
//!
//! The suite talks to an Appium-compatible server over its HTTP/JSON
//! protocol: one session per scenario case, element lookups by locator
//! strategy, and raw key events for fields that reject programmatic input.
//! Only the command subset the page objects need is implemented.

use std::time::{Duration, Instant};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use meridian_common::AutomationConfig;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::error::{E2eError, E2eResult};

/// W3C element id key in find-element responses.
const W3C_ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Android key event code for the keyboard's enter/done key.
const KEYCODE_ENTER: u32 = 66;

const STATUS_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// How an element is looked up on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    AccessibilityId(String),
    UiAutomator(String),
    Xpath(String),
}

impl Locator {
    pub fn accessibility_id(id: impl Into<String>) -> Self {
        Locator::AccessibilityId(id.into())
    }

    /// Exact visible-text match.
    pub fn text(text: &str) -> Self {
        Locator::UiAutomator(format!(r#"new UiSelector().text("{}")"#, escape_selector(text)))
    }

    /// Exact visible-text match, scrolling the nearest scrollable container
    /// until the element is in view.
    pub fn scrollable_text(text: &str) -> Self {
        Locator::UiAutomator(format!(
            r#"new UiScrollable(new UiSelector().scrollable(true)).scrollIntoView(new UiSelector().text("{}"))"#,
            escape_selector(text)
        ))
    }

    pub fn xpath(expr: impl Into<String>) -> Self {
        Locator::Xpath(expr.into())
    }

    /// The `using`/`value` pair this locator serializes to on the wire.
    pub fn strategy(&self) -> (&'static str, &str) {
        match self {
            Locator::AccessibilityId(id) => ("accessibility id", id),
            Locator::UiAutomator(selector) => ("-android uiautomator", selector),
            Locator::Xpath(expr) => ("xpath", expr),
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (using, value) = self.strategy();
        write!(f, "{}: {}", using, value)
    }
}

fn escape_selector(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Android keycode for a character typed as a raw key event.
fn android_keycode(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(7 + (c as u32 - '0' as u32)),
        'a'..='z' => Some(29 + (c as u32 - 'a' as u32)),
        ',' => Some(55),
        '.' => Some(56),
        ' ' => Some(62),
        '-' => Some(69),
        _ => None,
    }
}

/// Key event sequence for a whole string, or the character that has no
/// mapping.
fn keycode_sequence(text: &str) -> Result<Vec<u32>, char> {
    text.chars().map(|c| android_keycode(c).ok_or(c)).collect()
}

#[derive(Deserialize)]
struct Envelope {
    value: Value,
}

#[derive(Deserialize)]
struct WireError {
    error: String,
    #[serde(default)]
    message: String,
}

fn parse_envelope(body: &str) -> Option<Value> {
    serde_json::from_str::<Envelope>(body).ok().map(|e| e.value)
}

/// Map a non-2xx response body to the matching error. `no such element`
/// stays typed so the bounded waits can keep polling.
fn classify_wire_error(value: Value) -> E2eError {
    match serde_json::from_value::<WireError>(value.clone()) {
        Ok(err) if err.error == "no such element" => E2eError::NoSuchElement(err.message),
        Ok(err) => E2eError::Driver(format!("{}: {}", err.error, err.message)),
        Err(_) => E2eError::Driver(value.to_string()),
    }
}

fn new_session_capabilities(config: &AutomationConfig) -> Value {
    json!({
        "capabilities": {
            "alwaysMatch": {
                "platformName": "Android",
                "appium:automationName": "UiAutomator2",
                "appium:deviceName": config.device_name,
                "appium:appPackage": config.app_package,
                "appium:appActivity": config.app_activity,
                // every case starts from a clean install state
                "appium:fullReset": true,
                "appium:newCommandTimeout": config.new_session_timeout_secs,
            }
        }
    })
}

/// Factory for automation sessions against one server.
pub struct AutomationClient {
    http: reqwest::Client,
    config: AutomationConfig,
}

impl AutomationClient {
    pub fn new(config: &AutomationConfig) -> E2eResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.command_timeout())
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Wait for the server to report ready, then create an app session.
    pub async fn create_session(&self) -> E2eResult<DriverSession> {
        self.wait_until_ready().await?;

        let url = format!("{}/session", self.base_url());
        let caps = new_session_capabilities(&self.config);

        let resp = self
            .http
            .post(&url)
            .json(&caps)
            .send()
            .await
            .map_err(|e| E2eError::SessionStartup(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| E2eError::SessionStartup(e.to_string()))?;
        let value = parse_envelope(&body)
            .ok_or_else(|| E2eError::SessionStartup(format!("malformed response: {}", body)))?;

        if !status.is_success() {
            return Err(E2eError::SessionStartup(value.to_string()));
        }

        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| E2eError::SessionStartup(format!("no sessionId in: {}", value)))?
            .to_string();

        info!(session_id = %session_id, "automation session created");

        Ok(DriverSession {
            http: self.http.clone(),
            session_url: format!("{}/{}", url, session_id),
            session_id,
        })
    }

    fn base_url(&self) -> &str {
        self.config.server_url.trim_end_matches('/')
    }

    /// Bounded poll on `/status` until the server reports ready.
    async fn wait_until_ready(&self) -> E2eResult<()> {
        let url = format!("{}/status", self.base_url());
        let deadline = Instant::now() + self.config.new_session_timeout();
        let mut attempts = 0usize;

        loop {
            attempts += 1;

            match self.http.get(&url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    let ready = resp
                        .text()
                        .await
                        .ok()
                        .and_then(|body| parse_envelope(&body))
                        .and_then(|v| v.get("ready").and_then(Value::as_bool))
                        // servers without a ready flag are up once they answer
                        .unwrap_or(true);
                    if ready {
                        return Ok(());
                    }
                }
                Ok(resp) => {
                    warn!("status check returned {}", resp.status());
                }
                Err(e) => {
                    if attempts == 1 {
                        info!("waiting for automation server at {}...", self.config.server_url);
                    }
                    if !e.is_connect() {
                        warn!("status check error: {}", e);
                    }
                }
            }

            if Instant::now() >= deadline {
                return Err(E2eError::SessionStartup(format!(
                    "server at {} not ready after {} attempts",
                    self.config.server_url, attempts
                )));
            }

            sleep(STATUS_POLL_INTERVAL).await;
        }
    }
}

/// One live app session. Everything the page objects do funnels through
/// the command methods here.
pub struct DriverSession {
    http: reqwest::Client,
    session_id: String,
    session_url: String,
}

impl DriverSession {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub(crate) async fn find_element_id(&self, locator: &Locator) -> E2eResult<Option<String>> {
        let (using, value) = locator.strategy();
        match self.post("/element", json!({ "using": using, "value": value })).await {
            Ok(value) => {
                let id = value
                    .get(W3C_ELEMENT_KEY)
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        E2eError::Driver(format!("malformed element response: {}", value))
                    })?;
                Ok(Some(id.to_string()))
            }
            Err(E2eError::NoSuchElement(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub(crate) async fn click_element(&self, id: &str) -> E2eResult<()> {
        self.post(&format!("/element/{}/click", id), json!({})).await?;
        Ok(())
    }

    pub(crate) async fn send_keys_to(&self, id: &str, text: &str) -> E2eResult<()> {
        self.post(&format!("/element/{}/value", id), json!({ "text": text }))
            .await?;
        Ok(())
    }

    pub(crate) async fn clear_element(&self, id: &str) -> E2eResult<()> {
        self.post(&format!("/element/{}/clear", id), json!({})).await?;
        Ok(())
    }

    pub(crate) async fn element_text(&self, id: &str) -> E2eResult<String> {
        let value = self.get(&format!("/element/{}/text", id)).await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| E2eError::Driver(format!("malformed text response: {}", value)))
    }

    /// Press a single Android key event.
    pub async fn press_keycode(&self, keycode: u32) -> E2eResult<()> {
        self.post("/appium/device/press_keycode", json!({ "keycode": keycode }))
            .await?;
        Ok(())
    }

    /// Confirm through the keyboard's enter/done key.
    pub async fn press_enter(&self) -> E2eResult<()> {
        self.press_keycode(KEYCODE_ENTER).await
    }

    /// Type a string as raw key events. Amount fields and the auction name
    /// field filter programmatic input, so these go through the keyboard.
    pub async fn send_as_keyevent(&self, text: &str) -> E2eResult<()> {
        let sequence = keycode_sequence(text)
            .map_err(|c| E2eError::Driver(format!("no key event mapping for {:?}", c)))?;
        for keycode in sequence {
            self.press_keycode(keycode).await?;
        }
        Ok(())
    }

    /// Current screen as PNG bytes.
    pub async fn screenshot_png(&self) -> E2eResult<Vec<u8>> {
        let value = self.get("/screenshot").await?;
        let encoded = value
            .as_str()
            .ok_or_else(|| E2eError::Driver(format!("malformed screenshot response: {}", value)))?;
        BASE64
            .decode(encoded)
            .map_err(|e| E2eError::Driver(format!("screenshot payload: {}", e)))
    }

    /// End the session. The server uninstalls the app and releases the
    /// device.
    pub async fn quit(&self) -> E2eResult<()> {
        debug!(session_id = %self.session_id, "deleting session");
        self.execute(reqwest::Method::DELETE, String::new(), None).await?;
        Ok(())
    }

    async fn post(&self, path: &str, body: Value) -> E2eResult<Value> {
        self.execute(reqwest::Method::POST, path.to_string(), Some(body)).await
    }

    async fn get(&self, path: &str) -> E2eResult<Value> {
        self.execute(reqwest::Method::GET, path.to_string(), None).await
    }

    async fn execute(
        &self,
        method: reqwest::Method,
        path: String,
        body: Option<Value>,
    ) -> E2eResult<Value> {
        let url = format!("{}{}", self.session_url, path);
        debug!("{} {}", method, path);

        let mut req = self.http.request(method, &url);
        if let Some(body) = &body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        let value = parse_envelope(&body)
            .ok_or_else(|| E2eError::Driver(format!("malformed response ({}): {}", status, body)))?;

        if status.is_success() {
            Ok(value)
        } else {
            Err(classify_wire_error(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_wire_strategies() {
        let byid = Locator::accessibility_id("sign-in-button");
        assert_eq!(byid.strategy(), ("accessibility id", "sign-in-button"));

        let bytext = Locator::text("Wrong password");
        assert_eq!(
            bytext.strategy(),
            (
                "-android uiautomator",
                r#"new UiSelector().text("Wrong password")"#
            )
        );

        let byxpath = Locator::xpath("//*[@content-desc='save']");
        assert_eq!(byxpath.strategy(), ("xpath", "//*[@content-desc='save']"));
    }

    #[test]
    fn scrollable_text_scrolls_into_view() {
        let locator = Locator::scrollable_text("Amber Plaid Otter");
        let (using, value) = locator.strategy();
        assert_eq!(using, "-android uiautomator");
        assert!(value.starts_with("new UiScrollable("));
        assert!(value.contains(r#".text("Amber Plaid Otter")"#));
    }

    #[test]
    fn selector_text_is_escaped() {
        let locator = Locator::text(r#"say "hi""#);
        let (_, value) = locator.strategy();
        assert_eq!(value, r#"new UiSelector().text("say \"hi\"")"#);
    }

    #[test]
    fn keycode_sequence_for_amount_input() {
        // "0,1" is the decimal-comma keystroke encoding of 0.1
        assert_eq!(keycode_sequence("0,1"), Ok(vec![7, 55, 8]));
    }

    #[test]
    fn keycode_sequence_for_auction_name() {
        assert_eq!(
            keycode_sequence("2026-08"),
            Ok(vec![9, 7, 9, 13, 69, 7, 15])
        );
        // uppercase has no mapping
        assert_eq!(keycode_sequence("A"), Err('A'));
    }

    #[test]
    fn envelope_decoding_and_error_classification() {
        let body = r#"{"value":{"element-6066-11e4-a52e-4f735466cecf":"e42"}}"#;
        let value = parse_envelope(body).unwrap();
        assert_eq!(
            value.get(W3C_ELEMENT_KEY).and_then(Value::as_str),
            Some("e42")
        );

        let miss = parse_envelope(
            r#"{"value":{"error":"no such element","message":"no match for selector"}}"#,
        )
        .unwrap();
        assert!(matches!(
            classify_wire_error(miss),
            E2eError::NoSuchElement(_)
        ));

        let other = parse_envelope(
            r#"{"value":{"error":"invalid session id","message":"session is gone"}}"#,
        )
        .unwrap();
        assert!(matches!(classify_wire_error(other), E2eError::Driver(_)));

        assert!(parse_envelope("not json").is_none());
    }

    #[test]
    fn capabilities_request_full_reset() {
        let config = AutomationConfig::default();
        let caps = new_session_capabilities(&config);
        let always = &caps["capabilities"]["alwaysMatch"];
        assert_eq!(always["platformName"], "Android");
        assert_eq!(always["appium:appPackage"], "im.meridian.app");
        assert_eq!(always["appium:fullReset"], true);
    }
}
