//! Field tuples of the two transaction encodings.

use donut_core::{Address, TransactionRequest};
use donut_cryptography::RecoverableSignature;
use rlp::RlpStream;

/// Field tuple a transaction is serialized with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Encoding {
    /// `[nonce, gasPrice, gas, to, value, data]`
    EthCompatible,
    /// `[nonce, gasPrice, gas, feeCurrency, gatewayFeeRecipient, gatewayFee, to, value, data]`
    Native,
}

fn append_address(stream: &mut RlpStream, address: Option<&Address>) {
    match address {
        Some(address) => stream.append(&address.to_vec()),
        None => stream.append_empty_data(),
    };
}

impl Encoding {
    fn field_count(self) -> usize {
        match self {
            Encoding::EthCompatible => 6,
            Encoding::Native => 9,
        }
    }

    fn append_fields(self, stream: &mut RlpStream, tx: &TransactionRequest) {
        stream.append(&tx.nonce).append(&tx.gas_price).append(&tx.gas);
        if self == Encoding::Native {
            append_address(stream, tx.fee_currency.as_ref());
            append_address(stream, tx.gateway_fee_recipient.as_ref());
            match tx.gateway_fee {
                Some(fee) => stream.append(&fee),
                None => stream.append_empty_data(),
            };
        }
        append_address(stream, tx.to.as_ref());
        stream
            .append(&tx.value.unwrap_or_default())
            .append(&tx.data.clone().unwrap_or_default());
    }

    /// The fields followed by `[chainId, 0, 0]`, as hashed for EIP-155.
    pub(crate) fn signing_payload(self, tx: &TransactionRequest) -> Vec<u8> {
        let mut stream = RlpStream::new_list(self.field_count() + 3);
        self.append_fields(&mut stream, tx);
        stream
            .append(&tx.chain_id)
            .append_empty_data()
            .append_empty_data();
        stream.out().to_vec()
    }

    /// The fields followed by `[v, r, s]`; `v` is already computed.
    pub(crate) fn signed(
        self,
        tx: &TransactionRequest,
        v: u64,
        signature: &RecoverableSignature,
    ) -> Vec<u8> {
        let mut stream = RlpStream::new_list(self.field_count() + 3);
        self.append_fields(&mut stream, tx);
        stream
            .append(&v)
            .append(&signature.r_scalar().to_vec())
            .append(&signature.s_scalar().to_vec());
        stream.out().to_vec()
    }
}
