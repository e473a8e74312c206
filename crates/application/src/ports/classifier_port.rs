//! Classifier port - probabilistic spam classifier
//!
//! The classifier itself is an external service; this port only describes the
//! call the decision layer depends on.

use async_trait::async_trait;
use domain::ClassifierVerdict;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the external spam/phishing classifier
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClassifierPort: Send + Sync {
    /// Classify raw email text
    ///
    /// The returned verdict is trusted input; callers validate its shape.
    async fn classify(&self, text: &str) -> Result<ClassifierVerdict, ApplicationError>;

    /// Check whether the classifier service is reachable
    async fn is_healthy(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Classification;

    fn _assert_object_safe(_: &dyn ClassifierPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ClassifierPort>();
    }

    #[tokio::test]
    async fn mock_returns_verdict() {
        let mut mock = MockClassifierPort::new();
        mock.expect_classify().returning(|_| {
            Ok(ClassifierVerdict::new(
                Classification::Spam,
                vec![0.1, 0.9],
            ))
        });

        let verdict = mock.classify("hello").await.unwrap();
        assert_eq!(verdict.predicted, Classification::Spam);
    }
}
