//! Hash functions. The result is the lowercase hex encoding of the digest of the UTF-8 string.

use crate::{SparqlOp, UnarySparqlOp};
use md5::Md5;
use rdf_algebra_model::{EvalResult, OwnedStringLiteral, SimpleLiteralRef};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

macro_rules! create_hash_op {
    ($name:ident, $digest:ty, $sparql_name:literal) => {
        #[derive(Debug)]
        pub struct $name;

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $name {
            pub fn new() -> Self {
                Self {}
            }
        }

        impl SparqlOp for $name {
            fn name(&self) -> &str {
                $sparql_name
            }
        }

        impl UnarySparqlOp for $name {
            type Arg<'data> = SimpleLiteralRef<'data>;
            type Result<'data> = OwnedStringLiteral;

            fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
                let hash = hex::encode(<$digest>::new().chain_update(value.0).finalize());
                Ok(OwnedStringLiteral::new(hash, None))
            }
        }
    };
}

create_hash_op!(Md5SparqlOp, Md5, "md5");
create_hash_op!(Sha1SparqlOp, Sha1, "sha1");
create_hash_op!(Sha256SparqlOp, Sha256, "sha256");
create_hash_op!(Sha384SparqlOp, Sha384, "sha384");
create_hash_op!(Sha512SparqlOp, Sha512, "sha512");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_unary;
    use rdf_algebra_model::{EvalError, Literal, Term};

    fn abc() -> Term {
        Literal::new_simple_literal("abc").into()
    }

    #[test]
    fn digests_are_hex_encoded() {
        insta::assert_snapshot!(evaluate_unary(&Md5SparqlOp::new(), &abc()).unwrap(), @r#""900150983cd24fb0d6963f7d28e17f72""#);
        insta::assert_snapshot!(evaluate_unary(&Sha1SparqlOp::new(), &abc()).unwrap(), @r#""a9993e364706816aba3e25717850c26c9cd0d89d""#);
        insta::assert_snapshot!(evaluate_unary(&Sha256SparqlOp::new(), &abc()).unwrap(), @r#""ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad""#);
    }

    #[test]
    fn language_strings_are_rejected() {
        let value = Literal::new_language_tagged_literal_unchecked("abc", "en").into();
        assert_eq!(evaluate_unary(&Md5SparqlOp::new(), &value), Err(EvalError::TypeError));
    }
}
