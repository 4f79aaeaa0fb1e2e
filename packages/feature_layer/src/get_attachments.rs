//! Attachment metadata for a single feature.
//!
//! See <https://developers.arcgis.com/rest/services-reference/attachment-infos-feature-service-.htm>

use arcgis_rest_feature_layer_models::GetAttachmentsResponse;
use arcgis_rest_request::{Dispatcher, RequestError, RequestOptions, clean_url, request};

/// Options for [`get_attachments`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetAttachmentsOptions {
    /// Feature layer URL, e.g.
    /// `https://sampleserver6.arcgisonline.com/arcgis/rest/services/ServiceRequest/FeatureServer/0`.
    pub url: String,
    /// Object id of the feature whose attachments are listed. Passed to
    /// the service as-is.
    pub feature_id: i64,
    /// Forwarded unchanged to the dispatcher.
    pub request: RequestOptions,
}

impl GetAttachmentsOptions {
    /// Creates options with default request settings.
    #[must_use]
    pub fn new(url: impl Into<String>, feature_id: i64) -> Self {
        Self {
            url: url.into(),
            feature_id,
            request: RequestOptions::default(),
        }
    }

    /// Replaces the forwarded request options.
    #[must_use]
    pub fn with_request(mut self, request: RequestOptions) -> Self {
        self.request = request;
        self
    }
}

/// Returns `<layer url>/<feature id>/attachments`.
#[must_use]
pub fn attachments_url(layer_url: &str, feature_id: i64) -> String {
    format!("{}/{feature_id}/attachments", clean_url(layer_url))
}

/// Lists the `attachmentInfos` of a feature.
///
/// ```ignore
/// let dispatcher = HttpDispatcher::new()?;
/// let response = get_attachments(
///     &dispatcher,
///     &GetAttachmentsOptions::new(
///         "https://sampleserver6.arcgisonline.com/arcgis/rest/services/ServiceRequest/FeatureServer/0",
///         8484,
///     ),
/// )
/// .await?;
/// ```
///
/// # Errors
///
/// Returns the dispatcher's [`RequestError`] unchanged, or
/// [`RequestError::Json`] if the body is not an attachment list.
pub async fn get_attachments<D>(
    dispatcher: &D,
    options: &GetAttachmentsOptions,
) -> Result<GetAttachmentsResponse, RequestError>
where
    D: Dispatcher + ?Sized,
{
    request(
        dispatcher,
        &attachments_url(&options.url, options.feature_id),
        &options.request,
    )
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use arcgis_rest_feature_layer_models::AttachmentInfo;
    use arcgis_rest_request::test_utils::{OneShotServer, loopback_client};
    use arcgis_rest_request::{ClientConfig, HttpDispatcher, HttpMethod};
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    /// Records every dispatch and answers with a fixed result.
    struct FakeDispatcher {
        calls: Mutex<Vec<(String, RequestOptions)>>,
        reply: fn() -> Result<serde_json::Value, RequestError>,
    }

    impl FakeDispatcher {
        fn new(reply: fn() -> Result<serde_json::Value, RequestError>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply,
            }
        }

        fn calls(&self) -> Vec<(String, RequestOptions)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Dispatcher for FakeDispatcher {
        async fn dispatch(
            &self,
            url: &str,
            options: &RequestOptions,
        ) -> Result<serde_json::Value, RequestError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), options.clone()));
            (self.reply)()
        }
    }

    fn empty_reply() -> Result<serde_json::Value, RequestError> {
        Ok(json!({ "attachmentInfos": [] }))
    }

    #[test]
    fn builds_url_with_and_without_trailing_slash() {
        assert_eq!(
            attachments_url("https://svc/FeatureServer/0/", 8484),
            "https://svc/FeatureServer/0/8484/attachments"
        );
        assert_eq!(
            attachments_url("https://svc/FeatureServer/0", 8484),
            "https://svc/FeatureServer/0/8484/attachments"
        );
    }

    #[test]
    fn negative_feature_id_is_passed_through() {
        assert_eq!(
            attachments_url("https://svc/FeatureServer/0", -1),
            "https://svc/FeatureServer/0/-1/attachments"
        );
    }

    #[tokio::test]
    async fn dispatches_once_to_attachments_url() {
        let dispatcher = FakeDispatcher::new(empty_reply);
        let options = GetAttachmentsOptions::new("https://svc/FeatureServer/0/", 8484);

        get_attachments(&dispatcher, &options).await.unwrap();

        let calls = dispatcher.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://svc/FeatureServer/0/8484/attachments");
    }

    #[tokio::test]
    async fn forwards_request_options_unchanged() {
        let dispatcher = FakeDispatcher::new(empty_reply);
        let forwarded = RequestOptions::new()
            .with_http_method(HttpMethod::Post)
            .with_token("abc")
            .with_param("returnUrl", true)
            .with_header("Referer", "https://app.example");
        let options =
            GetAttachmentsOptions::new("https://svc/FeatureServer/0", 1).with_request(forwarded.clone());

        get_attachments(&dispatcher, &options).await.unwrap();

        assert_eq!(dispatcher.calls()[0].1, forwarded);
    }

    #[tokio::test]
    async fn empty_attachment_list() {
        let dispatcher = FakeDispatcher::new(empty_reply);
        let options = GetAttachmentsOptions::new("https://svc/FeatureServer/0", 1);

        let response = get_attachments(&dispatcher, &options).await.unwrap();
        assert_eq!(response, GetAttachmentsResponse::default());
    }

    #[tokio::test]
    async fn returns_attachment_infos_unmodified() {
        let dispatcher = FakeDispatcher::new(|| {
            Ok(json!({
                "attachmentInfos": [
                    { "id": 1, "contentType": "image/png", "size": 1024, "name": "a.png" }
                ]
            }))
        });
        let options = GetAttachmentsOptions::new("https://svc/FeatureServer/0", 1);

        let response = get_attachments(&dispatcher, &options).await.unwrap();
        assert_eq!(
            response.attachment_infos,
            vec![AttachmentInfo {
                id: 1,
                content_type: "image/png".to_string(),
                size: 1024,
                name: "a.png".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn propagates_dispatcher_error() {
        let dispatcher = FakeDispatcher::new(|| {
            Err(RequestError::Status {
                status: 404,
                url: "https://svc/FeatureServer/0/1/attachments".to_string(),
                body: "Not Found".to_string(),
            })
        });
        let options = GetAttachmentsOptions::new("https://svc/FeatureServer/0", 1);

        let err = get_attachments(&dispatcher, &options).await.unwrap_err();
        match err {
            RequestError::Status { status, url, body } => {
                assert_eq!(status, 404);
                assert_eq!(url, "https://svc/FeatureServer/0/1/attachments");
                assert_eq!(body, "Not Found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(dispatcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn fetches_over_http() {
        let server = OneShotServer::start(
            "200 OK",
            r#"{"attachmentInfos":[{"id":5,"contentType":"image/jpeg","size":2048,"name":"photo.jpg"}]}"#,
        )
        .await;
        let dispatcher = HttpDispatcher::with_client(loopback_client(), &ClientConfig::default());
        let options = GetAttachmentsOptions::new(
            format!("{}/arcgis/rest/services/ServiceRequest/FeatureServer/0/", server.base_url()),
            8484,
        );

        let response = get_attachments(&dispatcher, &options).await.unwrap();
        assert_eq!(response.attachment_infos.len(), 1);
        assert_eq!(response.attachment_infos[0].name, "photo.jpg");

        let recorded = server.recorded().await;
        assert_eq!(recorded.method(), "GET");
        assert_eq!(
            recorded.target(),
            "/arcgis/rest/services/ServiceRequest/FeatureServer/0/8484/attachments?f=json"
        );
    }
}
