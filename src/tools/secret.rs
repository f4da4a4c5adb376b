use core::fmt::Debug;

use secrecy::{ExposeSecret, SecretBox};
use zeroize::Zeroize;

/// A helper wrapper for managing secret values.
///
/// On top of `secrecy::SecretBox` functionality, it provides:
/// - Safe `Clone` implementation (without needing to impl `CloneableSecret`)
/// - Safe `Debug` implementation
pub(crate) struct Secret<T: Zeroize>(SecretBox<T>);

impl<T> Secret<T>
where
    T: Zeroize,
{
    pub fn expose_secret(&self) -> &T {
        self.0.expose_secret()
    }
}

impl<T> Secret<T>
where
    T: Zeroize + Clone,
{
    pub fn init_with(ctr: impl FnOnce() -> T) -> Self {
        Self(SecretBox::init_with(ctr))
    }
}

impl<T> Clone for Secret<T>
where
    T: Zeroize + Clone,
{
    fn clone(&self) -> Self {
        Self::init_with(|| self.0.expose_secret().clone())
    }
}

impl<T> Debug for Secret<T>
where
    T: Zeroize,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Secret<{}>(...)", core::any::type_name::<T>())
    }
}

#[cfg(test)]
mod tests {
    use crypto_bigint::U256;

    use super::Secret;

    #[test]
    fn debug_does_not_leak() {
        let secret = Secret::init_with(|| U256::from_u64(0xdeadbeef));
        let output = format!("{:?}", secret);
        assert!(!output.contains("deadbeef") && !output.contains("DEADBEEF"));
        assert!(output.starts_with("Secret<"));
    }

    #[test]
    fn clone_exposes_the_same_value() {
        let secret = Secret::init_with(|| U256::from_u64(5));
        assert_eq!(secret.clone().expose_secret(), &U256::from_u64(5));
    }
}
