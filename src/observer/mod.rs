use crate::data::{DataSlot, Value};
use crate::definition::{DefinitionId, DefinitionTree};
use futures::stream::LocalBoxStream;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

mod capability;
mod cascade;

/// Asynchronous result stream returned by state-altering capabilities. The
/// engine only builds and maps these; awaiting them is up to the caller.
pub type CapabilityStream<T> = LocalBoxStream<'static, T>;

/// Opaque handle to a UI component, owned by the hosting application.
pub type ComponentRef = Rc<dyn Any>;

/// A named validator: returns a message when the value is rejected.
pub type Validator = Rc<dyn Fn(&Value) -> Option<String>>;

/// Owned snapshot of a definition and the data it needs, handed to remote
/// capabilities.
#[derive(Debug, Clone)]
pub struct ResolutionRequest {
    pub definition: DefinitionTree,
    pub data: Vec<DataSlot>,
}

/// A definition tree produced by a remote workflow, with its data.
#[derive(Debug, Clone)]
pub struct RemoteDefinition {
    pub definition: DefinitionTree,
    pub data: Vec<DataSlot>,
}

/// Capabilities injected into a definition tree by the hosting UI.
///
/// Every callback is optional. Passive lookups fall back to a neutral answer
/// when absent; state-altering calls report the gap and yield an empty stream.
#[derive(Clone, Default)]
pub struct Observer {
    pub get_component: Option<Rc<dyn Fn(&str) -> Option<ComponentRef>>>,
    pub get_validator: Option<Rc<dyn Fn(&str) -> Option<Validator>>>,
    pub open_definition: Option<Rc<dyn Fn(ResolutionRequest) -> CapabilityStream<Value>>>,
    pub close_definition: Option<Rc<dyn Fn(&DefinitionTree, DefinitionId)>>,
    /// Called after a definition was closed; the flag tells whether edits were discarded.
    pub definition_closed: Option<Rc<dyn Fn(&DefinitionTree, DefinitionId, bool)>>,
    pub resolve_definition:
        Option<Rc<dyn Fn(ResolutionRequest) -> CapabilityStream<RemoteDefinition>>>,
    pub get_default_rtc: Option<Rc<dyn Fn() -> Option<String>>>,
    pub start_order: Option<Rc<dyn Fn(&str, ResolutionRequest) -> CapabilityStream<Value>>>,
    pub translate: Option<Rc<dyn Fn(&str) -> String>>,
    /// Runs once per `set_observer` call, after the whole subtree received the observer.
    pub after_set_observer: Option<Rc<dyn Fn(&DefinitionTree, DefinitionId)>>,
}

impl Observer {
    pub fn builder() -> ObserverBuilder {
        ObserverBuilder::default()
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let present = [
            ("get_component", self.get_component.is_some()),
            ("get_validator", self.get_validator.is_some()),
            ("open_definition", self.open_definition.is_some()),
            ("close_definition", self.close_definition.is_some()),
            ("definition_closed", self.definition_closed.is_some()),
            ("resolve_definition", self.resolve_definition.is_some()),
            ("get_default_rtc", self.get_default_rtc.is_some()),
            ("start_order", self.start_order.is_some()),
            ("translate", self.translate.is_some()),
            ("after_set_observer", self.after_set_observer.is_some()),
        ];
        f.debug_list()
            .entries(present.iter().filter(|(_, set)| *set).map(|(name, _)| name))
            .finish()
    }
}

#[derive(Default)]
pub struct ObserverBuilder {
    observer: Observer,
}

impl ObserverBuilder {
    pub fn get_component(mut self, f: impl Fn(&str) -> Option<ComponentRef> + 'static) -> Self {
        self.observer.get_component = Some(Rc::new(f));
        self
    }

    pub fn get_validator(mut self, f: impl Fn(&str) -> Option<Validator> + 'static) -> Self {
        self.observer.get_validator = Some(Rc::new(f));
        self
    }

    pub fn open_definition(
        mut self,
        f: impl Fn(ResolutionRequest) -> CapabilityStream<Value> + 'static,
    ) -> Self {
        self.observer.open_definition = Some(Rc::new(f));
        self
    }

    pub fn close_definition(mut self, f: impl Fn(&DefinitionTree, DefinitionId) + 'static) -> Self {
        self.observer.close_definition = Some(Rc::new(f));
        self
    }

    pub fn definition_closed(
        mut self,
        f: impl Fn(&DefinitionTree, DefinitionId, bool) + 'static,
    ) -> Self {
        self.observer.definition_closed = Some(Rc::new(f));
        self
    }

    pub fn resolve_definition(
        mut self,
        f: impl Fn(ResolutionRequest) -> CapabilityStream<RemoteDefinition> + 'static,
    ) -> Self {
        self.observer.resolve_definition = Some(Rc::new(f));
        self
    }

    pub fn get_default_rtc(mut self, f: impl Fn() -> Option<String> + 'static) -> Self {
        self.observer.get_default_rtc = Some(Rc::new(f));
        self
    }

    pub fn start_order(
        mut self,
        f: impl Fn(&str, ResolutionRequest) -> CapabilityStream<Value> + 'static,
    ) -> Self {
        self.observer.start_order = Some(Rc::new(f));
        self
    }

    pub fn translate(mut self, f: impl Fn(&str) -> String + 'static) -> Self {
        self.observer.translate = Some(Rc::new(f));
        self
    }

    pub fn after_set_observer(
        mut self,
        f: impl Fn(&DefinitionTree, DefinitionId) + 'static,
    ) -> Self {
        self.observer.after_set_observer = Some(Rc::new(f));
        self
    }

    pub fn build(self) -> Rc<Observer> {
        Rc::new(self.observer)
    }
}
