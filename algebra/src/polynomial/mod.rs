//! Definition and implementation of polynomials over `Z_Q[X]/(X^N+1)`.

mod coeff;
mod ntt;

pub use coeff::Polynomial;
pub use ntt::NttPolynomial;
