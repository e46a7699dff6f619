use crate::element::{Element, ElementId};

/// Owns every element of a simulation, in registration order.
///
/// Later elements paint above earlier ones and win hit tests.
#[derive(Default)]
pub struct UiRegistry {
    elements: Vec<Box<dyn Element>>,
    next_id: u32,
}

impl UiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `element` and assigns its id.
    pub fn insert<E: Element>(&mut self, element: E) -> ElementId {
        self.insert_boxed(Box::new(element))
    }

    pub fn insert_boxed(&mut self, mut element: Box<dyn Element>) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        element.base_mut().id = id;
        log::trace!("registered element `{}` as {id}", element.name());
        self.elements.push(element);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Drops every element. Ids are never reused.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Drops every element registered after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.elements.truncate(len);
    }

    pub fn get(&self, id: ElementId) -> Option<&(dyn Element + 'static)> {
        self.elements.iter().find(|e| e.id() == id).map(|e| &**e)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut (dyn Element + 'static)> {
        self.elements.iter_mut().find(|e| e.id() == id).map(|e| &mut **e)
    }

    /// Typed access, `None` if `id` is unknown or of another type.
    pub fn downcast<T: Element>(&self, id: ElementId) -> Option<&T> {
        self.get(id)?.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Element>(&mut self, id: ElementId) -> Option<&mut T> {
        self.get_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    /// First element with the given name.
    pub fn find(&self, name: &str) -> Option<ElementId> {
        self.elements.iter().find(|e| e.name() == name).map(|e| e.id())
    }

    /// Elements in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn Element + 'static)> {
        self.elements.iter().map(|e| &**e)
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Box<dyn Element>> {
        self.elements.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{UiButton, UiPanel};
    use easel_engine::coords::Rect;

    #[test]
    fn ids_are_unique_and_never_reused() {
        let mut reg = UiRegistry::new();
        let a = reg.insert(UiPanel::new("a", Rect::new(0.0, 0.0, 1.0, 1.0)));
        let b = reg.insert(UiPanel::new("b", Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert_ne!(a, b);

        reg.clear();
        let c = reg.insert(UiPanel::new("c", Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn typed_lookup() {
        let mut reg = UiRegistry::new();
        let panel = reg.insert(UiPanel::new("panel", Rect::new(0.0, 0.0, 1.0, 1.0)));
        let button = reg.insert(UiButton::new("pause", Rect::new(0.0, 0.0, 1.0, 1.0), "Pause"));

        assert!(reg.downcast::<UiPanel>(panel).is_some());
        assert!(reg.downcast::<UiButton>(panel).is_none());
        reg.downcast_mut::<UiButton>(button).unwrap().set_label("Resume");
        assert_eq!(reg.downcast::<UiButton>(button).unwrap().label(), "Resume");
        assert_eq!(reg.find("pause"), Some(button));
        assert_eq!(reg.get(button).unwrap().name(), "pause");
    }
}
