use aws_config::BehaviorVersion;
use lambda_runtime::{service_fn, Error, LambdaEvent};

use log::debug;
use serde_json::Value;
use sm_serve::{Classifier, Config, InferenceEndpoint, ObjectStore};

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = Config::from_env()?;
    debug!("Loaded configuration: {:?}", config);

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let classifier = Classifier::with_aws(config, &sdk_config);

    let classifier_ref = &classifier;

    let handler_closure =
        move |event: LambdaEvent<Value>| async move { handle_event(event, classifier_ref).await };

    debug!("Dispatching handler");
    lambda_runtime::run(service_fn(handler_closure)).await?;

    Ok(())
}

async fn handle_event<S, E>(
    event: LambdaEvent<Value>,
    classifier: &Classifier<S, E>,
) -> Result<Value, Error>
where
    S: ObjectStore,
    E: InferenceEndpoint,
{
    debug!("Inside handler, request {}", event.context.request_id);
    debug!("Received event: {:#?}", event.payload);

    let t = sm_serve::Timer::start("Handling request");

    let class = classifier.classify().await?;

    t.stop();

    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lambda_runtime::Context;
    use serde_json::json;
    use sm_serve::ObjectRef;
    use std::path::Path;

    struct FixedImage;

    #[async_trait]
    impl ObjectStore for FixedImage {
        async fn download(&self, _object: &ObjectRef, dest: &Path) -> sm_serve::Result<u64> {
            std::fs::write(dest, b"jpeg").unwrap();
            Ok(4)
        }
    }

    struct FixedAnswer(&'static str);

    #[async_trait]
    impl InferenceEndpoint for FixedAnswer {
        async fn invoke(
            &self,
            _endpoint_name: &str,
            _content_type: &str,
            _body: Vec<u8>,
        ) -> sm_serve::Result<Vec<u8>> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    fn classifier(
        dir: &tempfile::TempDir,
        answer: &'static str,
    ) -> Classifier<FixedImage, FixedAnswer> {
        let config =
            Config::new("trash-classifier").with_local_path(&dir.path().join("paper.jpg"));
        Classifier::new(config, FixedImage, FixedAnswer(answer))
    }

    #[tokio::test]
    async fn any_event_returns_class() {
        let dir = tempfile::tempdir().unwrap();
        let classifier = classifier(&dir, r#"{"predictions": {"class": "glass_bottle"}}"#);

        let event = LambdaEvent::new(json!({"anything": [1, 2]}), Context::default());
        let class = handle_event(event, &classifier).await.unwrap();

        assert_eq!(class, json!("glass_bottle"));
    }

    #[tokio::test]
    async fn failure_is_reported_to_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let classifier = classifier(&dir, r#"{"predictions": {}}"#);

        let event = LambdaEvent::new(json!(null), Context::default());
        let err: Error = handle_event(event, &classifier).await.unwrap_err();

        let err = err.downcast::<sm_serve::Error>().unwrap();
        assert!(matches!(*err, sm_serve::Error::MissingField("predictions.class")));
    }
}
