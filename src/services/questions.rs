//! Dynamically fetched binary-choice prompts.
//!
//! Each source makes a single request with the client's timeout and no retry.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

pub const EITHER_IO_URL: &str = "http://either.io/questions/next/1/";
pub const PRESS_THE_BUTTON_URL: &str = "https://api2.willyoupressthebutton.com/api/v2/dilemma";

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Question request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Question source returned HTTP {0}")]
    Status(u16),

    #[error("Malformed question payload: {0}")]
    Malformed(String),
}

/// A would-you-rather style question with the crowd's split so far.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRecord {
    pub title: String,
    pub option_a: String,
    pub option_b: String,
    pub percent_a: f64,
    pub percent_b: f64,
    pub extra_info: String,
}

#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch(&self) -> Result<QuestionRecord, SourceError>;
}

/// Share of each option in percent. Both are zero when nobody answered yet.
pub fn percentages(count_a: u64, count_b: u64) -> (f64, f64) {
    // Summed as floats: counts come from remote APIs and may sit near u64::MAX.
    let total = count_a as f64 + count_b as f64;
    if total == 0.0 {
        return (0.0, 0.0);
    }
    (count_a as f64 / total * 100.0, count_b as f64 / total * 100.0)
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, SourceError> {
    Ok(reqwest::Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()?)
}

async fn read_body(response: reqwest::Response) -> Result<String, SourceError> {
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }
    Ok(response.text().await?)
}

// Vote totals arrive either as JSON numbers or numeric strings.
fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| D::Error::custom(format!("invalid count {n}"))),
        serde_json::Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid count '{s}'"))),
        other => Err(D::Error::custom(format!("invalid count {other}"))),
    }
}

#[derive(Deserialize)]
struct EitherIoResponse {
    questions: Vec<EitherIoQuestion>,
}

#[derive(Deserialize)]
struct EitherIoQuestion {
    #[serde(default)]
    title: String,
    option_1: String,
    option_2: String,
    #[serde(deserialize_with = "deserialize_count")]
    option1_total: u64,
    #[serde(deserialize_with = "deserialize_count")]
    option2_total: u64,
    #[serde(default)]
    moreinfo: Option<String>,
}

/// "Would you rather" questions from either.io.
pub struct EitherIoSource {
    client: reqwest::Client,
    url: String,
}

impl EitherIoSource {
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        Ok(Self {
            client: build_client(timeout)?,
            url: EITHER_IO_URL.to_string(),
        })
    }

    pub fn parse_record(body: &str) -> Result<QuestionRecord, SourceError> {
        let response: EitherIoResponse =
            serde_json::from_str(body).map_err(|e| SourceError::Malformed(e.to_string()))?;
        let question = response
            .questions
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::Malformed("no questions in response".to_string()))?;

        let (percent_a, percent_b) = percentages(question.option1_total, question.option2_total);
        Ok(QuestionRecord {
            title: question.title.trim().to_string(),
            option_a: question.option_1.trim().to_string(),
            option_b: question.option_2.trim().to_string(),
            percent_a,
            percent_b,
            extra_info: question.moreinfo.unwrap_or_default().trim().to_string(),
        })
    }
}

#[async_trait]
impl QuestionSource for EitherIoSource {
    async fn fetch(&self) -> Result<QuestionRecord, SourceError> {
        let response = self.client.get(&self.url).send().await?;
        Self::parse_record(&read_body(response).await?)
    }
}

#[derive(Deserialize)]
struct DilemmaResponse {
    dilemma: Dilemma,
}

#[derive(Deserialize)]
struct Dilemma {
    txt1: String,
    txt2: String,
    #[serde(deserialize_with = "deserialize_count")]
    yes: u64,
    #[serde(deserialize_with = "deserialize_count")]
    no: u64,
}

/// "Will you press the button" dilemmas. Option A is pressing.
pub struct PressTheButtonSource {
    client: reqwest::Client,
    url: String,
}

impl PressTheButtonSource {
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        Ok(Self {
            client: build_client(timeout)?,
            url: PRESS_THE_BUTTON_URL.to_string(),
        })
    }

    pub fn parse_record(body: &str) -> Result<QuestionRecord, SourceError> {
        let response: DilemmaResponse =
            serde_json::from_str(body).map_err(|e| SourceError::Malformed(e.to_string()))?;
        let dilemma = response.dilemma;
        let (percent_a, percent_b) = percentages(dilemma.yes, dilemma.no);

        Ok(QuestionRecord {
            title: "Will you press the button?".to_string(),
            option_a: decode_html_entities(dilemma.txt1.trim()),
            option_b: decode_html_entities(dilemma.txt2.trim()),
            percent_a,
            percent_b,
            extra_info: String::new(),
        })
    }
}

#[async_trait]
impl QuestionSource for PressTheButtonSource {
    async fn fetch(&self) -> Result<QuestionRecord, SourceError> {
        let response = self.client.post(&self.url).send().await?;
        Self::parse_record(&read_body(response).await?)
    }
}

/// Decodes the named and numeric HTML entities the dilemma API emits.
/// Unknown entities are left as they are.
pub fn decode_html_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let decoded = tail.find(';').and_then(|end| {
            let entity = &tail[1..end];
            decode_entity(entity).map(|c| (c, end + 1))
        });
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}
