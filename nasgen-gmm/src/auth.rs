//! 5G-AKA on the UE side
//!
//! [`derive_challenge_response`] runs the success path of an Authentication
//! Request: MILENAGE f2345, RES*, then KAUSF -> KSEAF -> KAMF. The whole
//! vector is stored in the UE context in one step, replacing any earlier
//! one. [`derive_resync_token`] builds AUTS for a synchronisation failure
//! and leaves the key hierarchy untouched.

use nasgen_crypto::kdf::{derive_kamf, derive_kausf, derive_kseaf, derive_res_star};
use nasgen_nas::{CipheringAlgorithm, IntegrityAlgorithm};
use tracing::debug;

use crate::context::{AuthVector, UeTestContext};
use crate::error::GmmError;

/// SQN_MS reported in AUTS
pub const SQN_MS: [u8; 6] = [0x00, 0x00, 0x11, 0x22, 0x33, 0x44];

/// AMF used for MAC-S during resynchronisation
pub const RESYNC_AMF: [u8; 2] = [0x00, 0x00];

pub const AUTS_SIZE: usize = 14;

/// Derives RES* for the current challenge under the serving network name
/// `snn` and stores CK, IK, AK, KAUSF, KSEAF and KAMF in `ue`.
///
/// Nothing is stored if the SUPI is malformed or no challenge is set.
pub fn derive_challenge_response(ue: &mut UeTestContext, snn: &str) -> Result<[u8; 16], GmmError> {
    let supi_digits = ue
        .supi()
        .imsi_digits()
        .ok_or_else(|| GmmError::InvalidSupi(ue.supi().to_string()))?
        .to_string();
    let (rand, autn) = ue.challenge().ok_or(GmmError::NoChallenge)?;
    let (rand, autn) = (*rand, *autn);

    let out = ue.milenage().f2345(&rand);
    let res_star = derive_res_star(&out.ck, &out.ik, snn, &rand, &out.res);

    let mut sqn_xor_ak = [0u8; 6];
    sqn_xor_ak.copy_from_slice(&autn[..6]);
    let kausf = derive_kausf(&out.ck, &out.ik, snn, &sqn_xor_ak);
    let kseaf = derive_kseaf(&kausf, snn);
    let kamf = derive_kamf(&kseaf, &supi_digits, ue.abba());

    debug!("5G-AKA keys derived for {} ({})", ue.supi(), snn);

    ue.store_auth_vector(AuthVector {
        rand,
        autn,
        res: out.res,
        res_star,
        ck: out.ck,
        ik: out.ik,
        ak: out.ak,
        kausf,
        kseaf,
        kamf,
    });
    Ok(res_star)
}

/// AUTS = (SQN_MS xor AK*) || MAC-S with MAC-S = f1*(SQN_MS, `amf`).
pub fn derive_resync_token(ue: &UeTestContext, amf: &[u8; 2]) -> Result<[u8; AUTS_SIZE], GmmError> {
    let (rand, _) = ue.challenge().ok_or(GmmError::NoChallenge)?;
    let milenage = ue.milenage();
    let ak = milenage.f5_star(rand);
    let mac_s = milenage.f1_star(rand, &SQN_MS, amf);

    let mut auts = [0u8; AUTS_SIZE];
    for (i, (sqn, ak)) in SQN_MS.iter().zip(ak.iter()).enumerate() {
        auts[i] = sqn ^ ak;
    }
    auts[6..].copy_from_slice(&mac_s);
    debug!("AUTS derived for {}", ue.supi());
    Ok(auts)
}

/// Installs KNASenc/KNASint derived from the current KAMF and activates
/// the UE's NAS security context with fresh COUNTs.
pub fn activate_security(
    ue: &mut UeTestContext,
    ciphering: CipheringAlgorithm,
    integrity: IntegrityAlgorithm,
) -> Result<(), GmmError> {
    let kamf = *ue.kamf()?;
    let ng_ksi = ue.nas.ng_ksi;
    ue.security.derive_nas_keys(&kamf, ciphering, integrity);
    ue.security.set_ng_ksi(ng_ksi);
    ue.security.reset_counts();
    ue.security.activate();
    debug!("NAS security activated: {:?}/{:?}", ciphering, integrity);
    Ok(())
}
