// ==========================================
// 社区花名册 - 标准字段与关键词表
// ==========================================
// 职责: 标准字段 → 表头同义词（进程级常量，只读）
// 职责: 表头识别 / 社区列识别 / 社区名抽取所用关键词
// ==========================================

use indexmap::IndexMap;

/// 社区名标准字段
pub const COMMUNITY_FIELD: &str = "社区名";

/// 表头行识别关键词（子串包含计分）
pub const HEADER_KEYWORDS: &[&str] = &[
    "姓名", "名称", "村", "社区", "年龄", "金额", "电话", "身份证",
];

/// 社区列内容扫描关键词
pub const COMMUNITY_KEYWORDS: &[&str] = &["社区", "村", "村委会", "居委会"];

/// 社区名后缀（长的在前，正则交替按此顺序）
pub const COMMUNITY_SUFFIXES: &[&str] = &[
    "村民委员会",
    "居民委员会",
    "村委会",
    "居委会",
    "社区",
    "村",
];

/// 社区名前的街道/乡镇限定词
pub const TOWN_QUALIFIERS: &[&str] = &["街道办事处", "街道", "镇", "乡"];

// ==========================================
// CanonicalField - 标准字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalField {
    pub name: &'static str,
    pub synonyms: &'static [&'static str],
}

impl CanonicalField {
    /// 表头文本是否包含任一同义词
    pub fn matches_header(&self, header: &str) -> bool {
        self.synonyms.iter().any(|syn| header.contains(syn))
    }
}

// ==========================================
// CanonicalSchema - 标准字段表
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct CanonicalSchema {
    fields: &'static [CanonicalField],
}

static STANDARD_SCHEMA: CanonicalSchema = CanonicalSchema {
    fields: &[
        CanonicalField {
            name: COMMUNITY_FIELD,
            synonyms: &[
                "社区名称", "社区名", "村名", "村庄", "村居", "社区", "村委会", "居委会", "村",
                "名称",
            ],
        },
        CanonicalField {
            name: "姓名",
            synonyms: &["姓名", "名字", "户主", "联系人", "负责人"],
        },
        CanonicalField {
            name: "年龄",
            synonyms: &["年龄", "岁数", "周岁"],
        },
        CanonicalField {
            name: "金额",
            synonyms: &["金额", "补贴", "补助", "费用", "款项", "发放"],
        },
        CanonicalField {
            name: "性别",
            synonyms: &["性别"],
        },
        CanonicalField {
            name: "电话",
            synonyms: &["电话", "手机", "联系方式"],
        },
        CanonicalField {
            name: "身份证",
            synonyms: &["身份证", "证件号", "公民身份号码"],
        },
    ],
};

impl CanonicalSchema {
    /// 系统标准字段表
    pub fn standard() -> &'static CanonicalSchema {
        &STANDARD_SCHEMA
    }

    pub fn fields(&self) -> &'static [CanonicalField] {
        self.fields
    }

    pub fn field(&self, name: &str) -> Option<&'static CanonicalField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn community_field(&self) -> Option<&'static CanonicalField> {
        self.field(COMMUNITY_FIELD)
    }
}

/// 标准字段名 → 列下标（按标准字段表顺序）
pub type ColumnMapping = IndexMap<String, usize>;
