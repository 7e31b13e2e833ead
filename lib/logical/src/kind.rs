use rustc_hash::FxHashMap;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

/// What an operator can do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Produces solutions, a boolean or a graph from a store.
    Query,
    /// Produces a term from a solution.
    Evaluatable,
    /// Reduces a group of solutions to a term.
    Aggregate,
    /// Mutates a store.
    Update,
    /// Describes a property path.
    Path,
}

/// The number of operands an operator accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    Exact(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(expected) => count == expected,
            Arity::Between(min, max) => (min..=max).contains(&count),
            Arity::AtLeast(min) => count >= min,
        }
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Exact(expected) => write!(f, "{expected}"),
            Arity::Between(min, max) => write!(f, "{min} to {max}"),
            Arity::AtLeast(min) => write!(f, "at least {min}"),
        }
    }
}

/// Static metadata of an [OperatorKind].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatorInfo {
    /// The name of the operator in the textual algebra.
    pub name: &'static str,
    /// The number of operands in the textual algebra.
    pub arity: Arity,
    pub capability: Capability,
}

macro_rules! operator_kinds {
    ($($kind:ident => ($name:literal, $arity:expr, $capability:ident)),* $(,)?) => {
        /// Every operator of the algebra.
        ///
        /// The structure of graph patterns, paths and updates is modelled by dedicated types. This
        /// enum names their operators and carries the static metadata (name, arity, capability)
        /// that the parser, the validator and the evaluator share.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum OperatorKind {
            $($kind),*
        }

        impl OperatorKind {
            /// All operator kinds.
            pub const ALL: &'static [OperatorKind] = &[$(OperatorKind::$kind),*];

            pub fn info(self) -> OperatorInfo {
                match self {
                    $(OperatorKind::$kind => OperatorInfo {
                        name: $name,
                        arity: $arity,
                        capability: Capability::$capability,
                    }),*
                }
            }
        }
    };
}

use Arity::{AtLeast, Between, Exact};

operator_kinds! {
    // Logical and comparison operators
    Or => ("||", Exact(2), Evaluatable),
    And => ("&&", Exact(2), Evaluatable),
    Not => ("!", Exact(1), Evaluatable),
    Equal => ("=", Exact(2), Evaluatable),
    NotEqual => ("!=", Exact(2), Evaluatable),
    Less => ("<", Exact(2), Evaluatable),
    LessOrEqual => ("<=", Exact(2), Evaluatable),
    Greater => (">", Exact(2), Evaluatable),
    GreaterOrEqual => (">=", Exact(2), Evaluatable),
    In => ("in", AtLeast(1), Evaluatable),
    NotIn => ("notin", AtLeast(1), Evaluatable),
    // Arithmetic
    Add => ("+", Exact(2), Evaluatable),
    Subtract => ("-", Exact(2), Evaluatable),
    Multiply => ("*", Exact(2), Evaluatable),
    Divide => ("/", Exact(2), Evaluatable),
    UnaryPlus => ("+", Exact(1), Evaluatable),
    UnaryMinus => ("-", Exact(1), Evaluatable),
    // Functional forms
    Bound => ("bound", Exact(1), Evaluatable),
    If => ("if", Exact(3), Evaluatable),
    Coalesce => ("coalesce", AtLeast(0), Evaluatable),
    SameTerm => ("sameTerm", Exact(2), Evaluatable),
    // Terms
    Str => ("str", Exact(1), Evaluatable),
    Lang => ("lang", Exact(1), Evaluatable),
    LangMatches => ("langMatches", Exact(2), Evaluatable),
    Datatype => ("datatype", Exact(1), Evaluatable),
    Iri => ("iri", Exact(1), Evaluatable),
    BNode => ("bnode", Between(0, 1), Evaluatable),
    StrDt => ("strdt", Exact(2), Evaluatable),
    StrLang => ("strlang", Exact(2), Evaluatable),
    Uuid => ("uuid", Exact(0), Evaluatable),
    StrUuid => ("struuid", Exact(0), Evaluatable),
    IsIri => ("isIRI", Exact(1), Evaluatable),
    IsBlank => ("isBlank", Exact(1), Evaluatable),
    IsLiteral => ("isLiteral", Exact(1), Evaluatable),
    IsNumeric => ("isNumeric", Exact(1), Evaluatable),
    IsTriple => ("isTriple", Exact(1), Evaluatable),
    Triple => ("triple", Exact(3), Evaluatable),
    Subject => ("subject", Exact(1), Evaluatable),
    Predicate => ("predicate", Exact(1), Evaluatable),
    Object => ("object", Exact(1), Evaluatable),
    // Numeric functions
    Rand => ("rand", Exact(0), Evaluatable),
    Abs => ("abs", Exact(1), Evaluatable),
    Ceil => ("ceil", Exact(1), Evaluatable),
    Floor => ("floor", Exact(1), Evaluatable),
    Round => ("round", Exact(1), Evaluatable),
    // String functions
    Concat => ("concat", AtLeast(0), Evaluatable),
    SubStr => ("substr", Between(2, 3), Evaluatable),
    StrLen => ("strlen", Exact(1), Evaluatable),
    Replace => ("replace", Between(3, 4), Evaluatable),
    UCase => ("ucase", Exact(1), Evaluatable),
    LCase => ("lcase", Exact(1), Evaluatable),
    EncodeForUri => ("encode_for_uri", Exact(1), Evaluatable),
    Contains => ("contains", Exact(2), Evaluatable),
    StrStarts => ("strstarts", Exact(2), Evaluatable),
    StrEnds => ("strends", Exact(2), Evaluatable),
    StrBefore => ("strbefore", Exact(2), Evaluatable),
    StrAfter => ("strafter", Exact(2), Evaluatable),
    Regex => ("regex", Between(2, 3), Evaluatable),
    // Dates and times
    Year => ("year", Exact(1), Evaluatable),
    Month => ("month", Exact(1), Evaluatable),
    Day => ("day", Exact(1), Evaluatable),
    Hours => ("hours", Exact(1), Evaluatable),
    Minutes => ("minutes", Exact(1), Evaluatable),
    Seconds => ("seconds", Exact(1), Evaluatable),
    Timezone => ("timezone", Exact(1), Evaluatable),
    Tz => ("tz", Exact(1), Evaluatable),
    Now => ("now", Exact(0), Evaluatable),
    // Hash functions
    Md5 => ("md5", Exact(1), Evaluatable),
    Sha1 => ("sha1", Exact(1), Evaluatable),
    Sha256 => ("sha256", Exact(1), Evaluatable),
    Sha384 => ("sha384", Exact(1), Evaluatable),
    Sha512 => ("sha512", Exact(1), Evaluatable),
    // Expressions with special syntax
    Exists => ("exists", Exact(1), Evaluatable),
    NotExists => ("notexists", Exact(1), Evaluatable),
    Call => ("call", AtLeast(1), Evaluatable),
    // Graph patterns
    Bgp => ("bgp", AtLeast(0), Query),
    Path => ("path", Exact(3), Query),
    Join => ("join", Exact(2), Query),
    LeftJoin => ("leftjoin", Between(2, 3), Query),
    Filter => ("filter", Exact(2), Query),
    Union => ("union", Exact(2), Query),
    Graph => ("graph", Exact(2), Query),
    Extend => ("extend", Exact(2), Query),
    Minus => ("minus", Exact(2), Query),
    Table => ("table", AtLeast(1), Query),
    OrderBy => ("order", Exact(2), Query),
    Project => ("project", Exact(2), Query),
    Distinct => ("distinct", Exact(1), Query),
    Reduced => ("reduced", Exact(1), Query),
    Slice => ("slice", Exact(3), Query),
    Group => ("group", Exact(3), Query),
    Dataset => ("dataset", AtLeast(1), Query),
    Prefix => ("prefix", Exact(2), Query),
    Base => ("base", Exact(2), Query),
    // Query forms
    Ask => ("ask", Exact(1), Query),
    Construct => ("construct", Exact(2), Query),
    Describe => ("describe", Exact(2), Query),
    // Aggregates
    Count => ("count", Between(0, 2), Aggregate),
    Sum => ("sum", Between(1, 2), Aggregate),
    Avg => ("avg", Between(1, 2), Aggregate),
    Min => ("min", Between(1, 2), Aggregate),
    Max => ("max", Between(1, 2), Aggregate),
    Sample => ("sample", Between(1, 2), Aggregate),
    GroupConcat => ("group_concat", Between(1, 3), Aggregate),
    // Updates
    Update => ("update", AtLeast(0), Update),
    InsertData => ("insertdata", AtLeast(0), Update),
    DeleteData => ("deletedata", AtLeast(0), Update),
    DeleteWhere => ("deletewhere", AtLeast(0), Update),
    Modify => ("modify", Between(1, 4), Update),
    // Property paths
    Reverse => ("reverse", Exact(1), Path),
    Sequence => ("seq", Exact(2), Path),
    Alternative => ("alt", Exact(2), Path),
    ZeroOrOne => ("path?", Exact(1), Path),
    ZeroOrMore => ("path*", Exact(1), Path),
    OneOrMore => ("path+", Exact(1), Path),
    ZeroLength => ("path0", Exact(0), Path),
    NegatedPropertySet => ("notoneof", AtLeast(1), Path),
    Range => ("mod", Exact(3), Path),
    Repeat => ("pathN", Exact(2), Path),
}

/// Maps the operator names to the kinds that use them. Some names (e.g., `-`) are shared by
/// operators of different arity.
static REGISTRY: LazyLock<FxHashMap<&'static str, Vec<OperatorKind>>> = LazyLock::new(|| {
    let mut registry: FxHashMap<&'static str, Vec<OperatorKind>> = FxHashMap::default();
    for kind in OperatorKind::ALL {
        registry.entry(kind.info().name).or_default().push(*kind);
    }
    registry
});

impl OperatorKind {
    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn arity(self) -> Arity {
        self.info().arity
    }

    pub fn capability(self) -> Capability {
        self.info().capability
    }

    /// Returns the kinds that are named `name`.
    pub fn by_name(name: &str) -> &'static [OperatorKind] {
        REGISTRY.get(name).map_or(&[], Vec::as_slice)
    }

    /// Looks up the operator named `name` with the given `capability` that accepts `arity`
    /// operands.
    ///
    /// If the name is known but no operator accepts the arity, the first matching kind is
    /// returned so that the caller can report the arity mismatch.
    pub fn lookup(name: &str, capability: Capability, arity: usize) -> Option<OperatorKind> {
        let mut candidates = Self::by_name(name)
            .iter()
            .copied()
            .filter(|kind| kind.capability() == capability)
            .peekable();
        let first = candidates.peek().copied();
        candidates
            .find(|kind| kind.arity().accepts(arity))
            .or(first)
    }
}

impl Display for OperatorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_arity() {
        assert_eq!(
            OperatorKind::lookup("-", Capability::Evaluatable, 1),
            Some(OperatorKind::UnaryMinus)
        );
        assert_eq!(
            OperatorKind::lookup("-", Capability::Evaluatable, 2),
            Some(OperatorKind::Subtract)
        );
    }

    #[test]
    fn lookup_with_wrong_arity_returns_candidate() {
        let kind = OperatorKind::lookup("strlen", Capability::Evaluatable, 2);
        assert_eq!(kind, Some(OperatorKind::StrLen));
        assert!(!kind.unwrap().arity().accepts(2));
    }

    #[test]
    fn lookup_respects_capability() {
        assert_eq!(OperatorKind::lookup("join", Capability::Evaluatable, 2), None);
        assert_eq!(
            OperatorKind::lookup("join", Capability::Query, 2),
            Some(OperatorKind::Join)
        );
    }

    #[test]
    fn names_are_unique_per_capability_and_arity() {
        for kind in OperatorKind::ALL {
            let info = kind.info();
            let clashes = OperatorKind::by_name(info.name)
                .iter()
                .filter(|other| other.capability() == info.capability && other.arity() == info.arity)
                .count();
            assert_eq!(clashes, 1, "{kind:?}");
        }
    }
}
