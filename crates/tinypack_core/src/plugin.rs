use crate::hooks::CompilerHooks;

/// Extension point: a plugin wires listeners onto the compiler's hooks once,
/// when the compiler is created.
pub trait Plugin {
    fn apply(&self, hooks: &mut CompilerHooks);
}

impl<F> Plugin for F
where
    F: Fn(&mut CompilerHooks),
{
    fn apply(&self, hooks: &mut CompilerHooks) {
        self(hooks)
    }
}
