//! 输入校验：规则表驱动的字段校验器。
//!
//! 每类请求对应一张静态规则表（字段 -> 检查列表），校验器按表逐字段
//! 执行，输出字段名到错误信息的映射。纯函数，不抛错也无副作用。

use std::collections::BTreeMap;

/// 单个字段上的检查项。
#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// 非空（空白视为缺失）
    Required,
    /// 邮箱格式
    Email,
    /// 字符数区间
    Length { min: usize, max: usize },
}

impl Check {
    fn apply(&self, label: &str, value: &str) -> Option<String> {
        match self {
            Check::Required => value
                .is_empty()
                .then(|| format!("{} field is required", label)),
            Check::Email => (!is_email(value)).then(|| format!("{} is invalid", label)),
            Check::Length { min, max } => {
                let len = value.chars().count();
                (len < *min || len > *max).then(|| {
                    format!("{} must be between {} and {} characters", label, min, max)
                })
            }
        }
    }
}

/// 字段规则：字段名、展示名和检查列表。
pub struct Rule {
    pub field: &'static str,
    pub label: &'static str,
    pub checks: &'static [Check],
}

/// 一类请求的完整规则表。
pub struct RuleSet {
    rules: &'static [Rule],
}

impl RuleSet {
    pub const fn new(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    /// 按规则表逐字段检查；每个字段记录第一条失败的检查。
    pub fn validate(&self, bag: &FieldBag) -> Validation {
        let mut errors = BTreeMap::new();
        for rule in self.rules {
            let value = bag.get(rule.field);
            for check in rule.checks {
                if let Some(message) = check.apply(rule.label, value) {
                    errors.insert(rule.field.to_string(), message);
                    break;
                }
            }
        }
        Validation { errors }
    }
}

/// 原始字段包：字段名 -> 归一化后的值（缺失与空白归一化为空串）。
#[derive(Debug, Default)]
pub struct FieldBag(BTreeMap<&'static str, String>);

impl FieldBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// 放入一个可缺省字段。
    pub fn put(mut self, field: &'static str, value: Option<&str>) -> Self {
        let normalized = value.map(|v| v.trim().to_string()).unwrap_or_default();
        self.0.insert(field, normalized);
        self
    }

    fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }
}

/// 校验结果：字段名 -> 人类可读错误信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub errors: BTreeMap<String, String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// 简单邮箱格式检查：`local@domain`，domain 含 `.` 且整体无空白。
fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

/// 注册请求
pub static REGISTER_RULES: RuleSet = RuleSet::new(&[
    Rule {
        field: "name",
        label: "Name",
        checks: &[Check::Required, Check::Length { min: 2, max: 30 }],
    },
    Rule {
        field: "email",
        label: "Email",
        checks: &[Check::Required, Check::Email],
    },
    Rule {
        field: "password",
        label: "Password",
        checks: &[Check::Required, Check::Length { min: 6, max: 30 }],
    },
]);

/// 登录请求
pub static LOGIN_RULES: RuleSet = RuleSet::new(&[
    Rule {
        field: "email",
        label: "Email",
        checks: &[Check::Required, Check::Email],
    },
    Rule {
        field: "password",
        label: "Password",
        checks: &[Check::Required],
    },
]);

/// 建档请求
pub static PROFILE_RULES: RuleSet = RuleSet::new(&[
    Rule {
        field: "handle",
        label: "Handle",
        checks: &[Check::Required, Check::Length { min: 2, max: 40 }],
    },
    Rule {
        field: "skills",
        label: "Skills",
        checks: &[Check::Required],
    },
]);

/// 职业经历条目
pub static EXPERIENCE_RULES: RuleSet = RuleSet::new(&[
    Rule {
        field: "title",
        label: "Title",
        checks: &[Check::Required],
    },
    Rule {
        field: "company",
        label: "Company",
        checks: &[Check::Required],
    },
    Rule {
        field: "from",
        label: "From",
        checks: &[Check::Required],
    },
]);

/// 教育经历条目
pub static EDUCATION_RULES: RuleSet = RuleSet::new(&[
    Rule {
        field: "school",
        label: "School",
        checks: &[Check::Required],
    },
    Rule {
        field: "degree",
        label: "Degree",
        checks: &[Check::Required],
    },
    Rule {
        field: "field_of_study",
        label: "Field of Study",
        checks: &[Check::Required],
    },
    Rule {
        field: "from",
        label: "From",
        checks: &[Check::Required],
    },
]);

/// 发帖与评论正文
pub static POST_RULES: RuleSet = RuleSet::new(&[Rule {
    field: "text",
    label: "Text",
    checks: &[Check::Required, Check::Length { min: 10, max: 300 }],
}]);
