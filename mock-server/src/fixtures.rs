//! Canned variant records and field metadata served by the mock.

use serde_json::{json, Value};

/// Variant ids in the dataset, in insertion order.
pub const CHR9_ABCA1: &str = "chr9:g.107620835G>A";
pub const CHR1_SAMD11_A: &str = "chr1:g.866422C>T";
pub const CHR1_SAMD11_B: &str = "chr1:g.876664G>A";
pub const CHR1_OR4F5: &str = "chr1:g.69635G>C";
pub const CHR17_CDK3: &str = "chr17:g.40690453T>G";
pub const CHR7_CDK13: &str = "chr7:g.40085606A>G";

pub fn variants() -> Vec<Value> {
    vec![
        json!({
            "_id": CHR9_ABCA1,
            "chrom": "9",
            "cadd": {"alt": "A", "anc": "G", "phred": 3.21},
            "dbnsfp": {"genename": "ABCA1", "aa": {"ref": "R", "alt": "C"}},
            "dbsnp": {"rsid": "rs58991260"},
            "snpeff": {"ann": [{"gene_name": "ABCA1", "effect": "missense_variant"}]}
        }),
        json!({
            "_id": CHR1_SAMD11_A,
            "chrom": "1",
            "cadd": {"alt": "T", "anc": "C", "phred": 11.4},
            "dbnsfp": {"genename": "SAMD11"},
            "dbsnp": {"rsid": "rs2500"}
        }),
        json!({
            "_id": CHR1_SAMD11_B,
            "chrom": "1",
            "cadd": {"alt": "A", "anc": "G", "phred": 0.47},
            "dbnsfp": {"genename": "SAMD11"}
        }),
        json!({
            "_id": CHR1_OR4F5,
            "chrom": "1",
            "dbnsfp": {"genename": "OR4F5"},
            "snpeff": {"ann": [{"gene_name": "OR4F5", "effect": "missense_variant"}]}
        }),
        json!({
            "_id": CHR17_CDK3,
            "chrom": "17",
            "cadd": {"alt": "G", "anc": "T", "phred": 22.9},
            "dbnsfp": {"genename": "CDK3"}
        }),
        json!({
            "_id": CHR7_CDK13,
            "chrom": "7",
            "dbnsfp": {"genename": "CDK13"},
            "dbsnp": {"rsid": "rs1057519"}
        }),
    ]
}

pub fn fields() -> Value {
    json!({
        "cadd.alt": {"type": "keyword", "index": true},
        "cadd.anc": {"type": "keyword", "index": true},
        "cadd.phred": {"type": "float", "index": true},
        "chrom": {"type": "keyword", "index": true},
        "dbnsfp.aa.alt": {"type": "keyword", "index": true},
        "dbnsfp.aa.ref": {"type": "keyword", "index": true},
        "dbnsfp.genename": {"type": "keyword", "index": true},
        "dbsnp.rsid": {"type": "keyword", "index": true},
        "snpeff.ann.effect": {"type": "text", "index": true},
        "snpeff.ann.gene_name": {"type": "keyword", "index": true}
    })
}
