use crypto_bigint::{modular::Retrieve, Integer, Monty, Odd, PowBoundedExp};

/// An odd public modulus with precomputed Montgomery parameters.
#[derive(Debug, Clone)]
pub(crate) struct OddModulus<T: Integer> {
    modulus: T,
    monty_params: <T::Monty as Monty>::Params,
}

impl<T: Integer> OddModulus<T> {
    /// Returns `None` if `modulus` is zero or even.
    pub fn new(modulus: &T) -> Option<Self> {
        let odd = Option::<Odd<T>>::from(Odd::new(modulus.clone()))?;
        Some(Self {
            modulus: modulus.clone(),
            monty_params: <T::Monty as Monty>::new_params_vartime(odd),
        })
    }

    pub fn modulus(&self) -> &T {
        &self.modulus
    }

    /// Checks that `value` is a canonical non-zero residue, that is `0 < value < modulus`.
    pub fn is_nonzero_residue(&self, value: &T) -> bool {
        !bool::from(value.is_zero()) && value < &self.modulus
    }

    pub fn to_montgomery(&self, value: &T) -> T::Monty {
        <T::Monty as Monty>::new(value.clone(), self.monty_params.clone())
    }

    /// Returns `base^exponent mod modulus`, with the exponentiation bounded by the actual bit size of `exponent`.
    pub fn pow_vartime(&self, base: &T::Monty, exponent: &T) -> T
    where
        T::Monty: PowBoundedExp<T> + Retrieve<Output = T>,
    {
        base.pow_bounded_exp(exponent, exponent.bits_vartime()).retrieve()
    }

    /// Returns `base^exponent mod modulus` in time depending only on `exponent_bits`.
    pub fn pow_bounded(&self, base: &T::Monty, exponent: &T, exponent_bits: u32) -> T
    where
        T::Monty: PowBoundedExp<T> + Retrieve<Output = T>,
    {
        base.pow_bounded_exp(exponent, exponent_bits).retrieve()
    }
}
