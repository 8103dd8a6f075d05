//! Lifecycle handler for `Surnet::ParameterStore::Secret`.

use async_trait::async_trait;
use tracing::{debug, info};

use super::{HandlerRequest, HandlerResult, ProgressEvent, ResourceHandler};
use crate::errors::{HandlerError, Phase};
use crate::model::{merge_system_tags, PasswordSource, ResourceModel};
use crate::password;
use crate::planner::{plan_password, plan_tags, PasswordAction};
use crate::store::{ParameterStore, PutParameter};

/// Reconciles secret parameter resources against a [`ParameterStore`].
///
/// The store is injected at construction; the handler itself is stateless,
/// so one instance can serve any number of sequential invocations.
#[derive(Debug)]
pub struct SecretParameterHandler<S> {
    store: S,
}

impl<S: ParameterStore> SecretParameterHandler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Validates the password source of a desired state before any store call.
fn validated_source(model: &ResourceModel) -> Result<PasswordSource, HandlerError> {
    let source = model.password_source()?;
    if let PasswordSource::Options(options) = &source {
        password::validate(options)?;
    }
    model.validate_tags()?;
    Ok(source)
}

#[async_trait]
impl<S: ParameterStore> ResourceHandler for SecretParameterHandler<S> {
    async fn create(&self, request: &HandlerRequest) -> HandlerResult {
        let desired = request.desired()?;
        let name = desired.require_name()?;
        let source = validated_source(desired)?;

        let plan = plan_password(&source, None, None)?;
        let tags = merge_system_tags(&desired.tag_set(), &request.system_tags);

        info!(name = %name, action = plan.action.as_str(), tags = tags.len(), "Creating parameter");
        self.store
            .put_parameter(PutParameter {
                name: name.to_string(),
                value: plan.value.clone(),
                description: desired.description.clone(),
                key_id: desired.key_id.clone(),
                tier: desired.tier.clone(),
                tags,
                overwrite: false,
            })
            .await
            .map_err(|e| HandlerError::from_store(Phase::Put, name, e))?;

        let mut model = desired.clone();
        model.generated_value = Some(plan.value);
        Ok(ProgressEvent::success(model))
    }

    async fn read(&self, request: &HandlerRequest) -> HandlerResult {
        let desired = request.desired()?;
        let name = desired.require_name()?;

        debug!(name = %name, "Reading parameter");
        let parameter = self
            .store
            .get_parameter(name)
            .await
            .map_err(|e| HandlerError::from_store(Phase::Fetch, name, e))?;

        let mut model = desired.clone();
        model.arn = Some(parameter.arn);
        model.description = parameter.description;
        model.tier = parameter.tier;
        model.generated_value = Some(parameter.value);
        Ok(ProgressEvent::success(model))
    }

    async fn update(&self, request: &HandlerRequest) -> HandlerResult {
        let desired = request.desired()?;
        let previous = request.previous()?;
        let name = desired.require_name()?;

        if previous.name.as_deref() != Some(name) {
            return Err(HandlerError::validation_field("Cannot update parameter name", "Name"));
        }
        let source = validated_source(desired)?;

        let existing = self
            .store
            .get_parameter(name)
            .await
            .map_err(|e| HandlerError::from_store(Phase::Fetch, name, e))?;

        let plan = plan_password(&source, previous.previous_options(), Some(&existing.value))?;
        let write_value = plan.action != PasswordAction::Reuse || !desired.same_metadata(previous);

        info!(
            name = %name,
            action = plan.action.as_str(),
            write_value,
            "Updating parameter"
        );
        if write_value {
            self.store
                .put_parameter(PutParameter {
                    description: desired.description.clone(),
                    key_id: desired.key_id.clone(),
                    tier: desired.tier.clone(),
                    overwrite: true,
                    ..PutParameter::new(name, plan.value.clone())
                })
                .await
                .map_err(|e| HandlerError::from_store(Phase::Put, name, e))?;
        }

        let delta = plan_tags(&desired.tag_set(), &previous.tag_set());
        if !delta.to_remove.is_empty() {
            debug!(name = %name, keys = ?delta.to_remove, "Removing tags");
            self.store
                .remove_tags(name, &delta.to_remove)
                .await
                .map_err(|e| HandlerError::from_store(Phase::RemoveTags, name, e))?;
        }
        if !delta.to_add.is_empty() {
            debug!(name = %name, tags = delta.to_add.len(), "Adding tags");
            self.store
                .add_tags(name, &delta.to_add)
                .await
                .map_err(|e| HandlerError::from_store(Phase::AddTags, name, e))?;
        }

        let mut model = desired.clone();
        model.arn = Some(existing.arn);
        model.generated_value = Some(plan.value);
        Ok(ProgressEvent::success(model))
    }

    async fn delete(&self, request: &HandlerRequest) -> HandlerResult {
        let desired = request.desired()?;
        let name = desired.require_name()?;

        info!(name = %name, "Deleting parameter");
        self.store
            .delete_parameter(name)
            .await
            .map_err(|e| HandlerError::from_store(Phase::Delete, name, e))?;

        Ok(ProgressEvent::success_empty())
    }

    async fn list(&self, request: &HandlerRequest) -> HandlerResult {
        let page = self
            .store
            .describe_parameters(request.next_token.as_deref())
            .await
            .map_err(|e| HandlerError::from_store(Phase::List, "*", e))?;

        debug!(count = page.parameters.len(), more = page.next_token.is_some(), "Listed parameters");
        let models = page.parameters.into_iter().map(|p| ResourceModel::stub(p.name)).collect();
        Ok(ProgressEvent::list(models, page.next_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::OperationStatus;
    use crate::model::{tag_set, PasswordOptions};
    use crate::store::InMemoryParameterStore;
    use tracing_test::traced_test;

    fn handler() -> SecretParameterHandler<InMemoryParameterStore> {
        SecretParameterHandler::new(InMemoryParameterStore::new())
    }

    fn with_options(name: &str, options: PasswordOptions) -> ResourceModel {
        ResourceModel { password_options: Some(options), ..ResourceModel::stub(name) }
    }

    #[tokio::test]
    async fn test_create_generates_and_stores() {
        let handler = handler();
        let desired = with_options("/app/db", PasswordOptions::default().with_length(24));

        let event = handler.create(&HandlerRequest::create(desired)).await.unwrap();
        let generated = event.resource_model.unwrap().generated_value.unwrap();
        assert_eq!(generated.char_count(), 24);

        let stored = handler.store().get_parameter("/app/db").await.unwrap();
        assert_eq!(stored.value, generated);
    }

    #[tokio::test]
    async fn test_create_merges_system_tags() {
        let handler = handler();
        let desired = ResourceModel {
            tags: Some(tag_set([("env", "prod")])),
            ..with_options("p1", PasswordOptions::default())
        };
        let request =
            HandlerRequest::create(desired).with_system_tags([("aws:cloudformation:stack-name", "s")]);

        handler.create(&request).await.unwrap();
        assert_eq!(
            handler.store().tags("p1").await,
            Some(tag_set([("aws:cloudformation:stack-name", "s"), ("env", "prod")]))
        );
    }

    #[tokio::test]
    async fn test_create_existing_name_conflicts() {
        let handler = handler();
        let desired = with_options("p1", PasswordOptions::default());
        handler.create(&HandlerRequest::create(desired.clone())).await.unwrap();

        let err = handler.create(&HandlerRequest::create(desired)).await.unwrap_err();
        assert!(matches!(err, HandlerError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_read_refreshes_from_store() {
        let handler = handler();
        let desired = ResourceModel {
            description: Some("db".into()),
            password_input: Some("literal".into()),
            ..ResourceModel::stub("/app/db")
        };
        handler.create(&HandlerRequest::create(desired)).await.unwrap();

        let event = handler.read(&HandlerRequest::read(ResourceModel::stub("/app/db"))).await.unwrap();
        let model = event.resource_model.unwrap();
        assert_eq!(model.generated_value.unwrap().expose_secret(), "literal");
        assert_eq!(model.description.as_deref(), Some("db"));
        assert!(model.arn.unwrap().ends_with(":parameter/app/db"));
    }

    #[tokio::test]
    async fn test_update_reuses_password_for_same_options() {
        let handler = handler();
        let options = PasswordOptions::default().with_serial(1);
        let created = handler
            .create(&HandlerRequest::create(with_options("p1", options.clone())))
            .await
            .unwrap()
            .resource_model
            .unwrap();

        let desired = ResourceModel {
            tags: Some(tag_set([("team", "core")])),
            ..with_options("p1", options.clone())
        };
        let event = handler
            .update(&HandlerRequest::update(desired, with_options("p1", options)))
            .await
            .unwrap();

        assert_eq!(event.resource_model.unwrap().generated_value, created.generated_value);
        assert_eq!(handler.store().get_parameter("p1").await.unwrap().version, 1);
        assert_eq!(handler.store().tags("p1").await, Some(tag_set([("team", "core")])));
    }

    #[tokio::test]
    async fn test_update_with_input_overwrites() {
        let handler = handler();
        handler
            .create(&HandlerRequest::create(with_options("p1", PasswordOptions::default())))
            .await
            .unwrap();

        let desired = ResourceModel { password_input: Some("new".into()), ..ResourceModel::stub("p1") };
        let previous = with_options("p1", PasswordOptions::default());
        handler.update(&HandlerRequest::update(desired, previous)).await.unwrap();

        let stored = handler.store().get_parameter("p1").await.unwrap();
        assert_eq!(stored.value.expose_secret(), "new");
        assert_eq!(stored.version, 2);
    }

    #[tokio::test]
    async fn test_update_missing_parameter_is_not_found() {
        let handler = handler();
        let model = with_options("ghost", PasswordOptions::default());
        let err = handler
            .update(&HandlerRequest::update(model.clone(), model))
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_invoke_folds_errors_into_failed_event() {
        let handler = handler();
        let event = handler.invoke(&HandlerRequest::delete(ResourceModel::stub("ghost"))).await;

        assert_eq!(event.status, OperationStatus::Failed);
        assert_eq!(event.error_code, Some(crate::errors::HandlerErrorCode::NotFound));
    }

    #[tokio::test]
    async fn test_list_returns_stubs() {
        let handler = handler();
        for name in ["p2", "p1"] {
            handler
                .create(&HandlerRequest::create(with_options(name, PasswordOptions::default())))
                .await
                .unwrap();
        }

        let event = handler.invoke(&HandlerRequest::list(None)).await;
        assert!(event.is_success());
        assert_eq!(
            event.resource_models.unwrap(),
            vec![ResourceModel::stub("p1"), ResourceModel::stub("p2")]
        );
        assert_eq!(event.next_token, None);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_password_material_never_logged() {
        let handler = handler();
        let desired = ResourceModel { password_input: Some("s3cr3t-literal".into()), ..ResourceModel::stub("p1") };
        handler.invoke(&HandlerRequest::create(desired.clone())).await;
        handler.invoke(&HandlerRequest::update(desired.clone(), desired.clone())).await;
        handler.invoke(&HandlerRequest::read(desired)).await;

        assert!(logs_contain("Creating parameter"));
        assert!(logs_contain("Updating parameter"));
        assert!(!logs_contain("s3cr3t-literal"));
    }

    #[test]
    fn test_handler_usable_from_blocking_context() {
        let handler = handler();
        let event = tokio_test::block_on(
            handler.invoke(&HandlerRequest::create(with_options("p1", PasswordOptions::default()))),
        );
        assert!(event.is_success());
    }
}
