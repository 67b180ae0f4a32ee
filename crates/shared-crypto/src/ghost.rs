//! # One-Time (Ghost) Output Keys
//!
//! Stealth addressing over the Ed25519 group. A sender with ephemeral secret
//! `r` pays a recipient `(A, B)` (view, spend) with the one-time key
//!
//! ```text
//! P = Hs(r·A ‖ index)·G + B        mask R = r·G
//! ```
//!
//! The recipient holding view secret `a` recognizes the output because
//! `P − Hs(a·R ‖ index)·G == B`, and spends it with `x = Hs(a·R ‖ index) + b`.
//! An observer without `a` cannot link `P` to `(A, B)`.

use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::scalar::Scalar;

use crate::{CryptoError, Hash, Key, PrivateKey};

/// Hash a shared point and output index to a scalar.
fn hash_scalar(shared: &EdwardsPoint, output_index: u64) -> Scalar {
    let mut buf = Vec::with_capacity(32 + 10);
    buf.extend_from_slice(&shared.compress().to_bytes());
    put_uvarint(&mut buf, output_index);

    let first = Hash::new(&buf);
    let second = Hash::new(first.as_bytes());
    let mut wide = [0u8; 64];
    wide[..32].copy_from_slice(first.as_bytes());
    wide[32..].copy_from_slice(second.as_bytes());
    Scalar::from_bytes_mod_order_wide(&wide)
}

/// LEB128 unsigned varint.
fn put_uvarint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Sender side: derive the one-time key for recipient `(view, spend)`.
pub fn derive_ghost_public_key(
    ephemeral: &PrivateKey,
    public_view: &Key,
    public_spend: &Key,
    output_index: u64,
) -> Result<Key, CryptoError> {
    let view = public_view.to_point()?;
    let spend = public_spend.to_point()?;
    let shared = view * ephemeral.scalar();
    let s = hash_scalar(&shared, output_index);
    Ok(Key::from_point(&(EdwardsPoint::mul_base(&s) + spend)))
}

/// Recipient side: recover the spend key a one-time key was derived for.
///
/// The output belongs to the recipient iff the result equals its public spend
/// key.
pub fn view_ghost_output_key(
    ghost: &Key,
    private_view: &PrivateKey,
    mask: &Key,
    output_index: u64,
) -> Result<Key, CryptoError> {
    let ghost = ghost.to_point()?;
    let mask = mask.to_point()?;
    let shared = mask * private_view.scalar();
    let s = hash_scalar(&shared, output_index);
    Ok(Key::from_point(&(ghost - EdwardsPoint::mul_base(&s))))
}

/// Recipient side: the private key that controls a one-time key.
pub fn derive_ghost_private_key(
    mask: &Key,
    private_view: &PrivateKey,
    private_spend: &PrivateKey,
    output_index: u64,
) -> Result<PrivateKey, CryptoError> {
    let mask = mask.to_point()?;
    let shared = mask * private_view.scalar();
    let s = hash_scalar(&shared, output_index);
    Ok(PrivateKey::from_scalar(s + private_spend.scalar()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Wallet {
        spend: PrivateKey,
        view: PrivateKey,
    }

    impl Wallet {
        fn new(byte: u8) -> Self {
            let spend = PrivateKey::from_seed(&[byte; 64]);
            let view = spend.public().deterministic_hash_derive();
            Self { spend, view }
        }
    }

    #[test]
    fn test_uvarint_encoding() {
        let mut buf = Vec::new();
        put_uvarint(&mut buf, 0);
        assert_eq!(buf, vec![0]);

        buf.clear();
        put_uvarint(&mut buf, 300);
        assert_eq!(buf, vec![0xac, 0x02]);
    }

    #[test]
    fn test_recipient_recognizes_output() {
        let wallet = Wallet::new(11);
        let r = PrivateKey::from_seed(&[42u8; 64]);

        let ghost =
            derive_ghost_public_key(&r, &wallet.view.public(), &wallet.spend.public(), 0).unwrap();
        let recovered = view_ghost_output_key(&ghost, &wallet.view, &r.public(), 0).unwrap();

        assert_eq!(recovered, wallet.spend.public());
    }

    #[test]
    fn test_other_wallet_does_not_recognize_output() {
        let owner = Wallet::new(11);
        let other = Wallet::new(12);
        let r = PrivateKey::from_seed(&[42u8; 64]);

        let ghost =
            derive_ghost_public_key(&r, &owner.view.public(), &owner.spend.public(), 0).unwrap();
        let recovered = view_ghost_output_key(&ghost, &other.view, &r.public(), 0).unwrap();

        assert_ne!(recovered, owner.spend.public());
        assert_ne!(recovered, other.spend.public());
    }

    #[test]
    fn test_ghost_private_key_controls_output() {
        let wallet = Wallet::new(5);
        let r = PrivateKey::from_seed(&[7u8; 64]);

        let ghost =
            derive_ghost_public_key(&r, &wallet.view.public(), &wallet.spend.public(), 0).unwrap();
        let private =
            derive_ghost_private_key(&r.public(), &wallet.view, &wallet.spend, 0).unwrap();

        assert_eq!(private.public(), ghost);
    }

    #[test]
    fn test_output_index_changes_key() {
        let wallet = Wallet::new(5);
        let r = PrivateKey::from_seed(&[7u8; 64]);
        let (view, spend) = (wallet.view.public(), wallet.spend.public());

        let k0 = derive_ghost_public_key(&r, &view, &spend, 0).unwrap();
        let k1 = derive_ghost_public_key(&r, &view, &spend, 1).unwrap();
        assert_ne!(k0, k1);
    }

    #[test]
    fn test_one_time_key_unlinkable_to_spend_key() {
        let wallet = Wallet::new(5);
        let r = PrivateKey::from_seed(&[7u8; 64]);
        let ghost =
            derive_ghost_public_key(&r, &wallet.view.public(), &wallet.spend.public(), 0).unwrap();
        assert_ne!(ghost, wallet.spend.public());
        assert_ne!(ghost, wallet.view.public());
    }
}
