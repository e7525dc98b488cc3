use super::{
    CapabilityStream, ComponentRef, Observer, RemoteDefinition, ResolutionRequest, Validator,
};
use crate::bundle::ResolutionBundle;
use crate::data::{DataSlot, Value};
use crate::definition::{DefinitionId, DefinitionKind, DefinitionTree};
use crate::error::Diagnostic;
use futures::StreamExt;
use futures::stream;
use tracing::{debug, error};

impl DefinitionTree {
    fn capability<T>(
        &self,
        id: DefinitionId,
        pick: impl FnOnce(&Observer) -> Option<T>,
    ) -> Option<T> {
        self[id].observer.as_deref().and_then(pick)
    }

    fn report_missing<T: 'static>(
        &self,
        id: DefinitionId,
        capability: &'static str,
    ) -> CapabilityStream<T> {
        let diagnostic = Diagnostic::CapabilityMissing {
            capability,
            definition: self.identity(id),
        };
        error!(%diagnostic, "Returning an empty result stream");
        stream::empty().boxed_local()
    }

    /// Translates `text` through the observer, or returns it unchanged.
    pub fn translate(&self, id: DefinitionId, text: &str) -> String {
        match self.capability(id, |o| o.translate.clone()) {
            Some(translate) => translate(text),
            None => text.to_string(),
        }
    }

    /// The UI component backing a `Component` definition.
    pub fn component(&self, id: DefinitionId) -> Option<ComponentRef> {
        let DefinitionKind::Component { component } = &self[id].kind else {
            return None;
        };
        let lookup = self.capability(id, |o| o.get_component.clone())?;
        lookup(component.as_str())
    }

    pub fn validator(&self, id: DefinitionId, name: &str) -> Option<Validator> {
        let lookup = self.capability(id, |o| o.get_validator.clone())?;
        lookup(name)
    }

    pub fn default_rtc(&self, id: DefinitionId) -> Option<String> {
        let lookup = self.capability(id, |o| o.get_default_rtc.clone())?;
        lookup()
    }

    /// Snapshot of `id` and the pruned data it reads.
    pub fn resolution_request(&self, id: DefinitionId, data: &[DataSlot]) -> ResolutionRequest {
        ResolutionRequest {
            definition: self.extract(id),
            data: self.prune_data(id, data),
        }
    }

    pub fn open_definition(&self, id: DefinitionId, data: &[DataSlot]) -> CapabilityStream<Value> {
        match self.capability(id, |o| o.open_definition.clone()) {
            Some(open) => open(self.resolution_request(id, data)),
            None => self.report_missing(id, "open_definition"),
        }
    }

    /// Asks the remote workflow to resolve `id`.
    ///
    /// Every definition the stream yields carries a resolution bundle made of
    /// the requesting definition and its pruned data, so it can be re-entered
    /// later without the rest of the data.
    pub fn resolve_definition(
        &self,
        id: DefinitionId,
        data: &[DataSlot],
    ) -> CapabilityStream<RemoteDefinition> {
        let Some(resolve) = self.capability(id, |o| o.resolve_definition.clone()) else {
            return self.report_missing(id, "resolve_definition");
        };
        let request = self.resolution_request(id, data);
        let bundle = ResolutionBundle::new(request.definition.clone(), request.data.clone());
        debug!(definition = %self.identity(id), "Captured resolution bundle");

        resolve(request)
            .map(move |mut produced| {
                if let Some(root) = produced.definition.root() {
                    produced
                        .definition
                        .set_resolution_bundle(root, bundle.clone());
                }
                produced
            })
            .boxed_local()
    }

    pub fn start_order(
        &self,
        id: DefinitionId,
        order: &str,
        data: &[DataSlot],
    ) -> CapabilityStream<Value> {
        match self.capability(id, |o| o.start_order.clone()) {
            Some(start) => start(order, self.resolution_request(id, data)),
            None => self.report_missing(id, "start_order"),
        }
    }

    /// Closes the UI surface showing `id`. With `discard`, pending edits in
    /// the subtree are dropped first.
    pub fn close_definition(&mut self, id: DefinitionId, discard: bool) {
        if discard {
            self.clear_data_change_state(id);
        }
        match self.capability(id, |o| o.close_definition.clone()) {
            Some(close) => close(&*self, id),
            None => debug!(definition = %self.identity(id), "No close_definition capability"),
        }
        if let Some(closed) = self.capability(id, |o| o.definition_closed.clone()) {
            closed(&*self, id, discard);
        }
    }
}
