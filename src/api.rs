use lambda_runtime::{Error, LambdaEvent, service_fn};
use tracing::debug;

use crate::{
    dispatcher::Dispatcher,
    models::{message::SnsEvent, response::HandlerResponse},
};

pub async fn run_handler(dispatcher: Dispatcher) -> Result<(), Error> {
    let dispatcher = &dispatcher;

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<SnsEvent>| async move {
            debug!(request_id = %event.context.request_id, "Invocation started");
            handle_event(dispatcher, event.payload).await
        },
    ))
    .await
}

/// Runs one invocation. Returns `None` (JSON `null`) when the batch was
/// aborted for missing configuration.
pub async fn handle_event(
    dispatcher: &Dispatcher,
    event: SnsEvent,
) -> Result<Option<HandlerResponse>, Error> {
    debug!(event = ?event, "Received event");

    match dispatcher.process(event).await {
        Ok(results) => Ok(Some(HandlerResponse::ok(&results)?)),
        Err(_) => Ok(None),
    }
}
