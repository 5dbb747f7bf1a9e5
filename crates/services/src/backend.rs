use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use quiz_core::QuizScope;
use quiz_core::model::{AnswerSubmission, Grade, Question, Subject, SubjectId, Topic, UserId};

use crate::config::BackendConfig;
use crate::error::QuizApiError;

/// Remote quiz backend contract.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// `GET /get_users`
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError` for transport, status or decoding failures.
    async fn list_users(&self) -> Result<Vec<UserId>, QuizApiError>;

    /// `GET /get_subjects?user=`
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError` for transport, status or decoding failures.
    async fn list_subjects(&self, user: &UserId) -> Result<Vec<Subject>, QuizApiError>;

    /// `GET /get_topics?user=&subject=`
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError` for transport, status or decoding failures.
    async fn list_topics(
        &self,
        user: &UserId,
        subject: &SubjectId,
    ) -> Result<Vec<Topic>, QuizApiError>;

    /// `GET /get_questions?user=&subject=&topic=`
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError` for transport, status or decoding failures.
    async fn next_question(&self, scope: &QuizScope) -> Result<Question, QuizApiError>;

    /// `GET /get_random_question`
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError` for transport, status or decoding failures.
    async fn random_question(&self) -> Result<Question, QuizApiError>;

    /// `POST /check_answer`
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError` for transport, status or decoding failures.
    async fn check_answer(
        &self,
        scope: Option<&QuizScope>,
        submission: &AnswerSubmission,
    ) -> Result<Grade, QuizApiError>;
}

//
// ─── HTTP ──────────────────────────────────────────────────────────────────────
//

/// `QuizBackend` over plain HTTP. No auth, retries or timeouts.
#[derive(Clone)]
pub struct HttpQuizBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpQuizBackend {
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, QuizApiError> {
        let mut url = self.config.endpoint(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, QuizApiError> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, QuizApiError> {
    if !response.status().is_success() {
        return Err(QuizApiError::HttpStatus(response.status()));
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl QuizBackend for HttpQuizBackend {
    async fn list_users(&self) -> Result<Vec<UserId>, QuizApiError> {
        let url = self.url("get_users", &[])?;
        let body: UsersResponse = self.get_json(url).await?;
        Ok(body.users)
    }

    async fn list_subjects(&self, user: &UserId) -> Result<Vec<Subject>, QuizApiError> {
        let url = self.url("get_subjects", &[("user", user.as_str())])?;
        let body: SubjectsResponse = self.get_json(url).await?;
        Ok(body.subjects)
    }

    async fn list_topics(
        &self,
        user: &UserId,
        subject: &SubjectId,
    ) -> Result<Vec<Topic>, QuizApiError> {
        let url = self.url(
            "get_topics",
            &[("user", user.as_str()), ("subject", subject.as_str())],
        )?;
        let body: TopicsResponse = self.get_json(url).await?;
        Ok(body.topics)
    }

    async fn next_question(&self, scope: &QuizScope) -> Result<Question, QuizApiError> {
        let url = self.url(
            "get_questions",
            &[
                ("user", scope.user.as_str()),
                ("subject", scope.subject.as_str()),
                ("topic", scope.topic.as_str()),
            ],
        )?;
        self.get_json(url).await
    }

    async fn random_question(&self) -> Result<Question, QuizApiError> {
        let url = self.url("get_random_question", &[])?;
        self.get_json(url).await
    }

    async fn check_answer(
        &self,
        scope: Option<&QuizScope>,
        submission: &AnswerSubmission,
    ) -> Result<Grade, QuizApiError> {
        let url = self.url("check_answer", &[])?;
        let payload = CheckAnswerRequest {
            question: &submission.question,
            answer: &submission.answer,
            user: scope.map(|scope| scope.user.as_str()),
            subject: scope.map(|scope| scope.subject.as_str()),
            topic: scope.map(|scope| scope.topic.as_str()),
        };
        tracing::debug!(%url, "POST");
        let response = self.client.post(url).json(&payload).send().await?;
        decode(response).await
    }
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
    users: Vec<UserId>,
}

#[derive(Debug, Deserialize)]
struct SubjectsResponse {
    subjects: Vec<Subject>,
}

#[derive(Debug, Deserialize)]
struct TopicsResponse {
    topics: Vec<Topic>,
}

#[derive(Debug, Serialize)]
struct CheckAnswerRequest<'a> {
    question: &'a str,
    answer: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::TopicId;

    fn backend() -> HttpQuizBackend {
        HttpQuizBackend::new(BackendConfig::new("http://quiz.local/api").unwrap())
    }

    #[test]
    fn query_parameters_are_encoded() {
        let url = backend()
            .url(
                "get_topics",
                &[("user", "ana maria"), ("subject", "maths&stats")],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://quiz.local/api/get_topics?user=ana+maria&subject=maths%26stats"
        );
    }

    #[test]
    fn bare_endpoint_has_no_query() {
        let url = backend().url("get_users", &[]).unwrap();
        assert_eq!(url.as_str(), "http://quiz.local/api/get_users");
    }

    #[test]
    fn check_answer_payload_omits_missing_scope() {
        let payload = CheckAnswerRequest {
            question: "Q",
            answer: "True",
            user: None,
            subject: None,
            topic: None,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({ "question": "Q", "answer": "True" })
        );
    }

    #[test]
    fn check_answer_payload_carries_scope() {
        let scope = QuizScope {
            user: UserId::new("alice"),
            subject: SubjectId::new("math"),
            topic: TopicId::new("add"),
        };
        let payload = CheckAnswerRequest {
            question: "Q",
            answer: "A,C",
            user: Some(scope.user.as_str()),
            subject: Some(scope.subject.as_str()),
            topic: Some(scope.topic.as_str()),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["answer"], "A,C");
        assert_eq!(value["topic"], "add");
    }

    #[test]
    fn users_response_decodes() {
        let body: UsersResponse = serde_json::from_str(r#"{"users":["alice","bob"]}"#).unwrap();
        assert_eq!(body.users, vec![UserId::new("alice"), UserId::new("bob")]);
    }
}
