//! MILENAGE authentication and key generation (3GPP TS 35.206)
//!
//! f1/f1* produce the network and resynchronisation MACs, f2345 produces
//! RES, CK, IK, AK together with the resynchronisation anonymity key f5*.

use crate::aes::{xor_block, Aes128Block, BLOCK_SIZE};

/// Key size in bytes (128 bits)
pub const KEY_SIZE: usize = 16;
/// OP/OPc size in bytes (128 bits)
pub const OP_SIZE: usize = 16;
/// RAND size in bytes (128 bits)
pub const RAND_SIZE: usize = 16;
/// SQN size in bytes (48 bits)
pub const SQN_SIZE: usize = 6;
/// AMF size in bytes (16 bits)
pub const AMF_SIZE: usize = 2;
/// MAC-A / MAC-S size in bytes (64 bits)
pub const MAC_SIZE: usize = 8;
/// RES size in bytes (64 bits)
pub const RES_SIZE: usize = 8;
/// CK / IK size in bytes (128 bits)
pub const CK_SIZE: usize = 16;
pub const IK_SIZE: usize = 16;
/// AK size in bytes (48 bits)
pub const AK_SIZE: usize = 6;

/// Rotation amounts in bits for OUT1..OUT5.
const R1: usize = 64;
const R2: usize = 0;
const R3: usize = 32;
const R4: usize = 64;
const R5: usize = 96;

/// c_i is all zeros except the last octet.
const fn constant(last: u8) -> [u8; BLOCK_SIZE] {
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, last]
}

const C1: [u8; BLOCK_SIZE] = constant(0x00);
const C2: [u8; BLOCK_SIZE] = constant(0x01);
const C3: [u8; BLOCK_SIZE] = constant(0x02);
const C4: [u8; BLOCK_SIZE] = constant(0x04);
const C5: [u8; BLOCK_SIZE] = constant(0x08);

/// Cyclic left rotation; all MILENAGE rotations are whole octets.
fn rotate(block: &[u8; BLOCK_SIZE], bits: usize) -> [u8; BLOCK_SIZE] {
    let mut out = *block;
    out.rotate_left((bits / 8) % BLOCK_SIZE);
    out
}

/// OPc = OP XOR E_K(OP)
pub fn compute_opc(k: &[u8; KEY_SIZE], op: &[u8; OP_SIZE]) -> [u8; OP_SIZE] {
    let mut opc = Aes128Block::new(k).encrypt_block_copy(op);
    xor_block(&mut opc, op);
    opc
}

/// Outputs of a single f2345 evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct F2345 {
    pub res: [u8; RES_SIZE],
    pub ck: [u8; CK_SIZE],
    pub ik: [u8; IK_SIZE],
    pub ak: [u8; AK_SIZE],
    /// f5*, the anonymity key used when building AUTS
    pub ak_star: [u8; AK_SIZE],
}

/// MILENAGE keyed with K and OPc.
pub struct Milenage {
    cipher: Aes128Block,
    opc: [u8; OP_SIZE],
}

impl Milenage {
    pub fn new(k: &[u8; KEY_SIZE], opc: &[u8; OP_SIZE]) -> Self {
        Self {
            cipher: Aes128Block::new(k),
            opc: *opc,
        }
    }

    /// Keyed with OP instead of OPc.
    pub fn new_with_op(k: &[u8; KEY_SIZE], op: &[u8; OP_SIZE]) -> Self {
        Self::new(k, &compute_opc(k, op))
    }

    /// TEMP = E_K(RAND XOR OPc)
    fn temp(&self, rand: &[u8; RAND_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut temp = *rand;
        xor_block(&mut temp, &self.opc);
        self.cipher.encrypt_block(&mut temp);
        temp
    }

    /// E_K(input XOR c) XOR OPc
    fn finish(&self, mut block: [u8; BLOCK_SIZE], c: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        xor_block(&mut block, c);
        self.cipher.encrypt_block(&mut block);
        xor_block(&mut block, &self.opc);
        block
    }

    /// OUT2..OUT5 = E_K(rot(TEMP XOR OPc, r) XOR c) XOR OPc
    fn out(&self, temp: &[u8; BLOCK_SIZE], r: usize, c: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut block = *temp;
        xor_block(&mut block, &self.opc);
        self.finish(rotate(&block, r), c)
    }

    /// OUT1 = E_K(TEMP XOR rot(IN1 XOR OPc, r1) XOR c1) XOR OPc,
    /// IN1 = SQN || AMF || SQN || AMF
    fn out1(
        &self,
        rand: &[u8; RAND_SIZE],
        sqn: &[u8; SQN_SIZE],
        amf: &[u8; AMF_SIZE],
    ) -> [u8; BLOCK_SIZE] {
        let mut in1 = [0u8; BLOCK_SIZE];
        in1[0..6].copy_from_slice(sqn);
        in1[6..8].copy_from_slice(amf);
        in1[8..14].copy_from_slice(sqn);
        in1[14..16].copy_from_slice(amf);
        xor_block(&mut in1, &self.opc);

        let mut block = rotate(&in1, R1);
        xor_block(&mut block, &self.temp(rand));
        self.finish(block, &C1)
    }

    /// f1: network authentication code MAC-A.
    pub fn f1(
        &self,
        rand: &[u8; RAND_SIZE],
        sqn: &[u8; SQN_SIZE],
        amf: &[u8; AMF_SIZE],
    ) -> [u8; MAC_SIZE] {
        let out1 = self.out1(rand, sqn, amf);
        let mut mac = [0u8; MAC_SIZE];
        mac.copy_from_slice(&out1[..8]);
        mac
    }

    /// f1*: resynchronisation code MAC-S.
    pub fn f1_star(
        &self,
        rand: &[u8; RAND_SIZE],
        sqn: &[u8; SQN_SIZE],
        amf: &[u8; AMF_SIZE],
    ) -> [u8; MAC_SIZE] {
        let out1 = self.out1(rand, sqn, amf);
        let mut mac = [0u8; MAC_SIZE];
        mac.copy_from_slice(&out1[8..]);
        mac
    }

    /// f2, f3, f4, f5 and f5* over one RAND.
    pub fn f2345(&self, rand: &[u8; RAND_SIZE]) -> F2345 {
        let temp = self.temp(rand);

        let out2 = self.out(&temp, R2, &C2);
        let mut res = [0u8; RES_SIZE];
        res.copy_from_slice(&out2[8..]);
        let mut ak = [0u8; AK_SIZE];
        ak.copy_from_slice(&out2[..6]);

        let out5 = self.out(&temp, R5, &C5);
        let mut ak_star = [0u8; AK_SIZE];
        ak_star.copy_from_slice(&out5[..6]);

        F2345 {
            res,
            ck: self.out(&temp, R3, &C3),
            ik: self.out(&temp, R4, &C4),
            ak,
            ak_star,
        }
    }

    /// f5* alone, for the resynchronisation path.
    pub fn f5_star(&self, rand: &[u8; RAND_SIZE]) -> [u8; AK_SIZE] {
        self.f2345(rand).ak_star
    }
}
