use crate::config::InsightConfig;
use crate::zodiac::ZodiacAnimal;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// Cultural narrative for a set of age figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub cultural_significance: String,
    pub zodiac_reading: String,
    pub life_stage_advice: String,
}

impl Insight {
    /// Static text shown whenever the service can't provide one.
    pub fn fallback(zodiac: ZodiacAnimal) -> Self {
        Self {
            cultural_significance: "年龄不仅是数字，更是生命的积淀。在中国传统中，不同的岁数承载着不同的社会责任与期待。".to_string(),
            zodiac_reading: format!("属{zodiac}的人通常具有独特的魅力与坚韧的品质。"),
            life_stage_advice: "凡是过往，皆为序章。愿你历经千帆，归来仍是少年。".to_string(),
        }
    }
}

/// Inputs sent to the service.
#[derive(Debug, Clone)]
pub struct InsightRequest {
    /// `YYYY-MM-DD`
    pub birth_date: String,
    pub international_age: i32,
    pub nominal_age: i32,
    pub zodiac: ZodiacAnimal,
}

impl InsightRequest {
    fn prompt(&self) -> String {
        format!(
            r#"
    用户出生日期为 {birth}。
    当前周岁为 {intl} 岁，虚岁为 {nominal} 岁，属相为 {zodiac}。
    请根据中国传统文化和现代视角，提供以下内容：
    1. 虚岁与周岁在这个特定年龄的文化意义（例如：而立之年、不惑之年等称谓）。
    2. 该属相在今年的简要运势或性格特质。
    3. 给该人生阶段的一句富有诗意的建议。
    请以 JSON 格式返回。
  "#,
            birth = self.birth_date,
            intl = self.international_age,
            nominal = self.nominal_age,
            zodiac = self.zodiac,
        )
    }
}

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("service returned HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}
#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}
#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<Part>>,
}
#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

pub struct InsightClient {
    config: InsightConfig,
    http: Client,
}

impl InsightClient {
    pub fn new(config: InsightConfig) -> Result<Self, InsightError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent("agecompute")
            .build()?;
        Ok(Self { config, http })
    }

    /// One `generateContent` call. No retries: every computation is its own
    /// attempt.
    pub async fn fetch(&self, req: &InsightRequest) -> Result<Insight, InsightError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(InsightError::MissingApiKey)?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint, self.config.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": req.prompt() }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "culturalSignificance": { "type": "STRING" },
                        "zodiacReading": { "type": "STRING" },
                        "lifeStageAdvice": { "type": "STRING" }
                    },
                    "required": ["culturalSignificance", "zodiacReading", "lifeStageAdvice"]
                }
            }
        });

        log::debug!("requesting insight from {url}");
        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(InsightError::Status(status.as_u16()));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| InsightError::Malformed(format!("response is not JSON: {e}")))?;

        parse_generate_response(json)
    }

    /// Like [`fetch`](Self::fetch), but any failure is logged and replaced by
    /// [`Insight::fallback`].
    pub async fn insight_or_fallback(&self, req: &InsightRequest) -> Insight {
        match self.fetch(req).await {
            Ok(insight) => insight,
            Err(e) => {
                log::warn!("insight unavailable, using fallback text: {e}");
                Insight::fallback(req.zodiac)
            }
        }
    }
}

/// Pulls the generated text out of a `generateContent` response and parses it
/// as an [`Insight`].
fn parse_generate_response(json: Value) -> Result<Insight, InsightError> {
    let parsed: GenerateResponse = serde_json::from_value(json)
        .map_err(|e| InsightError::Malformed(format!("unexpected response shape: {e}")))?;

    let text = parsed
        .candidates
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.content)
        .and_then(|c| c.parts)
        .and_then(|p| p.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| InsightError::Malformed("no candidate text".to_string()))?;

    parse_insight_text(&text)
}

fn parse_insight_text(text: &str) -> Result<Insight, InsightError> {
    let insight: Insight = serde_json::from_str(text.trim())
        .map_err(|e| InsightError::Malformed(format!("candidate text is not an insight: {e}")))?;

    let fields = [
        ("culturalSignificance", &insight.cultural_significance),
        ("zodiacReading", &insight.zodiac_reading),
        ("lifeStageAdvice", &insight.life_stage_advice),
    ];
    if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(InsightError::Malformed(format!("{name} is empty")));
    }

    Ok(insight)
}
