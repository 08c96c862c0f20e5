use crate::context_items::ContextItem;
use crate::location::Location;
use crate::path::PathPattern;

use super::{Context, Message, OptionalOptions};

/// Accumulates a chain's declaration.
///
/// Chains hold a builder and call [`build`](Self::build) each time they run,
/// so every run starts from a fresh [`Context`].
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    fields: Vec<PathPattern>,
    locations: Vec<Location>,
    stack: Vec<ContextItem>,
    optional: Option<OptionalOptions>,
    message: Option<Message>,
    negate_next: bool,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fields(&mut self, fields: Vec<PathPattern>) -> &mut Self {
        self.fields = fields;
        self
    }

    pub fn set_locations(&mut self, locations: Vec<Location>) -> &mut Self {
        self.locations = locations;
        self
    }

    /// Sets the chain-level default message.
    pub fn set_message(&mut self, message: Message) -> &mut Self {
        self.message = Some(message);
        self
    }

    /// Appends an item. A validation item consumes a pending negation.
    pub fn add_item(&mut self, mut item: ContextItem) -> &mut Self {
        if item.is_validation() && self.negate_next {
            item.negate();
            self.negate_next = false;
        }
        self.stack.push(item);
        self
    }

    /// Negates the next validation item only.
    pub fn negate(&mut self) -> &mut Self {
        self.negate_next = true;
        self
    }

    pub fn set_optional(&mut self, options: Option<OptionalOptions>) -> &mut Self {
        self.optional = options;
        self
    }

    /// Attaches `message` to the last item of the stack.
    ///
    /// Returns false when the stack is empty or its last item is not a
    /// validation.
    pub fn set_last_message(&mut self, message: Message) -> bool {
        match self.stack.last_mut().filter(|item| item.is_validation()) {
            Some(item) => {
                item.set_message(message);
                true
            }
            None => false,
        }
    }

    pub fn fields(&self) -> &[PathPattern] {
        &self.fields
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn stack(&self) -> &[ContextItem] {
        &self.stack
    }

    /// Freezes the declaration into a new, empty [`Context`].
    pub fn build(&self) -> Context {
        Context::new(
            self.fields.clone(),
            self.locations.clone(),
            self.stack.clone(),
            self.optional,
            self.message.clone(),
        )
    }
}
