use crate::{element::ID, response::Resolution};

type CollisionCallbackFn = Box<dyn FnMut(ID, ID, &Resolution)>;

struct CollisionCallback {
    id: u32,
    callback: CollisionCallbackFn,
}

impl CollisionCallback {
    fn call(&mut self, id_a: ID, id_b: ID, resolution: &Resolution) {
        (self.callback)(id_a, id_b, resolution)
    }
}

/// Listeners told about every resolved collision of a tick.
#[derive(Default)]
pub(crate) struct CallbackHook {
    callback_id_count: u32,
    collision_callbacks: Vec<CollisionCallback>,
}

impl CallbackHook {
    pub(crate) fn register_callback<F>(&mut self, callback: F) -> u32
    where
        F: FnMut(ID, ID, &Resolution) + 'static,
    {
        self.callback_id_count += 1;
        let id = self.callback_id_count;
        self.collision_callbacks.push(CollisionCallback {
            id,
            callback: Box::new(callback),
        });
        id
    }

    pub(crate) fn unregister_callback(&mut self, callback_id: u32) -> bool {
        let before = self.collision_callbacks.len();
        self.collision_callbacks
            .retain(|callback| callback.id != callback_id);
        before != self.collision_callbacks.len()
    }

    pub(crate) fn emit(&mut self, id_a: ID, id_b: ID, resolution: &Resolution) {
        for callback in self.collision_callbacks.iter_mut() {
            callback.call(id_a, id_b, resolution);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.collision_callbacks.is_empty()
    }
}

impl std::fmt::Debug for CallbackHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackHook")
            .field("callbacks", &self.collision_callbacks.len())
            .finish()
    }
}
