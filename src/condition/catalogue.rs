//! Catalogue of supported conditions

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shape of the arguments a condition takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ArgType {
    /// `arg`: a sub-array in input syntax
    SubInput,
    /// `arg`: sub-array, `arg2`: amount, `comparison`
    SubInputComparison,
    /// `strict`: `"true"` or `"false"`
    Strictness,
    /// `arg`: number or single character, `comparison`
    Numerical,
    /// no arguments
    None,
}

impl std::fmt::Display for ArgType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgType::SubInput => write!(f, "subInput"),
            ArgType::SubInputComparison => write!(f, "subInputComparison"),
            ArgType::Strictness => write!(f, "strictness"),
            ArgType::Numerical => write!(f, "numerical"),
            ArgType::None => write!(f, "none"),
        }
    }
}

/// One catalogue entry
#[derive(Debug, Clone, Serialize)]
pub struct ConditionInfo {
    pub condition: &'static str,
    pub description: &'static str,
    pub arg_type: ArgType,
}

const CATALOGUE: &[ConditionInfo] = &[
    ConditionInfo {
        condition: "subarray",
        description: "contains the argument as adjacent values, eg. 'sparkler' contains 'park'",
        arg_type: ArgType::SubInput,
    },
    ConditionInfo {
        condition: "subsequence",
        description: "contains the argument as a subsequence, eg. 'category' contains 'coy'",
        arg_type: ArgType::SubInput,
    },
    ConditionInfo {
        condition: "count",
        description: "number of appearances of the first argument (as a subarray) compared with the second, \
                      counting only non-overlapping terms, eg. 'banana' has 1 copy of 'ana'",
        arg_type: ArgType::SubInputComparison,
    },
    ConditionInfo {
        condition: "contains",
        description: "contains the elements of the argument in any order, so the elements form a \
                      super(multi)set of the argument, eg. 'trace' contains 'art'",
        arg_type: ArgType::SubInput,
    },
    ConditionInfo {
        condition: "excludes",
        description: "does not contain any of the elements of the argument, eg. 'warm' excludes 'hot'",
        arg_type: ArgType::SubInput,
    },
    ConditionInfo {
        condition: "startsWith",
        description: "begins with the argument, eg. 'teapot' starts with 'tea'",
        arg_type: ArgType::SubInput,
    },
    ConditionInfo {
        condition: "endsWith",
        description: "ends with the argument, eg. 'yellow' ends with 'low'",
        arg_type: ArgType::SubInput,
    },
    ConditionInfo {
        condition: "increasing",
        description: "values are in increasing order, strictly increasing requires each value to be \
                      strictly greater than the previous",
        arg_type: ArgType::Strictness,
    },
    ConditionInfo {
        condition: "decreasing",
        description: "values are in decreasing order, strictly decreasing requires each value to be \
                      strictly less than the previous",
        arg_type: ArgType::Strictness,
    },
    ConditionInfo {
        condition: "palindrome",
        description: "is the same as its reverse, eg. 'radar'",
        arg_type: ArgType::None,
    },
    ConditionInfo {
        condition: "distinct",
        description: "has all elements distinct, eg. 'copyright'",
        arg_type: ArgType::None,
    },
    ConditionInfo {
        condition: "countDistinct",
        description: "number of distinct elements compared with the argument, eg. '1, 2, 2, 3' = '3'",
        arg_type: ArgType::Numerical,
    },
    ConditionInfo {
        condition: "derangement",
        description: "no value is in the same place as it was originally, eg. 'idea' is a derangement of 'aide'",
        arg_type: ArgType::None,
    },
    ConditionInfo {
        condition: "sum",
        description: "sum of elements compared with the argument, eg. '1, 2, 3' = '6'",
        arg_type: ArgType::Numerical,
    },
    ConditionInfo {
        condition: "maximum",
        description: "largest element compared with the argument, eg. '1, 2, 3' < '4' or 'fazed' = 'z'",
        arg_type: ArgType::Numerical,
    },
    ConditionInfo {
        condition: "minimum",
        description: "smallest element compared with the argument, eg. '1, 2, 3' > '0' or 'glass' = 'a'",
        arg_type: ArgType::Numerical,
    },
    ConditionInfo {
        condition: "minFrequency",
        description: "lowest frequency of any element compared with the argument, eg. 'breeze' = '1'",
        arg_type: ArgType::Numerical,
    },
    ConditionInfo {
        condition: "maxFrequency",
        description: "highest frequency of any element compared with the argument, eg. 'breeze' = '3'",
        arg_type: ArgType::Numerical,
    },
    ConditionInfo {
        condition: "average",
        description: "average of elements compared with the argument, eg. '1, 2, 3' = '2'",
        arg_type: ArgType::Numerical,
    },
    ConditionInfo {
        condition: "median",
        description: "median of elements compared with the argument, eg. '1, 2, 3, 4' = '2.5'",
        arg_type: ArgType::Numerical,
    },
    ConditionInfo {
        condition: "countOverlap",
        description: "number of appearances of the first argument (as a subarray) compared with the second, \
                      including overlapping terms, eg. 'banana' has 2 copies of 'ana'",
        arg_type: ArgType::SubInputComparison,
    },
    ConditionInfo {
        condition: "subseqCount",
        description: "number of appearances of the first argument (as a subsequence) compared with the \
                      second, eg. 'banana' has 4 subsequences of 'ana'",
        arg_type: ArgType::SubInputComparison,
    },
];

/// Every supported condition, in display order
pub fn catalogue() -> &'static [ConditionInfo] {
    CATALOGUE
}

/// Look up a condition by name
pub fn lookup(name: &str) -> Option<&'static ConditionInfo> {
    CATALOGUE.iter().find(|info| info.condition == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = catalogue().iter().map(|i| i.condition).collect();
        assert_eq!(names.len(), catalogue().len());
        assert_eq!(catalogue().len(), 22);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("sum").map(|i| i.arg_type), Some(ArgType::Numerical));
        assert!(lookup("minFreqElt").is_none());
    }
}
