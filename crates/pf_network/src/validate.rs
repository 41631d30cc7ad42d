// crates/pf_network/src/validate.rs

//! 网络健康检查
//!
//! 对网络拓扑与数据做运行前诊断。拓扑硬错误（越界、自环）在
//! [`Network::new`](crate::topology::Network::new) 构造时即被拒绝，
//! 本模块检查构造后仍可能存在的问题：孤立孔隙、重复喉道、
//! 非有限坐标，以及含 NaN 的属性数组和空标签。

use crate::data::Element;
use crate::topology::Network;
use pf_foundation::validation::{ValidationError, ValidationReport, ValidationWarning};
use std::collections::HashMap;

/// 对网络执行健康检查
///
/// 返回的报告中，孤立孔隙等结构问题记为错误，含 NaN 的属性
/// （通常表示元素未被任何几何/物理对象覆盖）与空标签记为警告。
pub fn check_network(net: &Network) -> ValidationReport {
    let mut report = ValidationReport::new();

    // 孤立孔隙：单孔隙网络除外（没有可连接的对象）
    if net.pore_count() > 1 {
        for p in 0..net.pore_count() {
            if net.incident_throats(p).is_empty() {
                report.add_error(ValidationError::IsolatedPore { pore: p });
            }
        }
    }

    // 重复喉道
    let mut seen: HashMap<[usize; 2], usize> = HashMap::new();
    for (t, &conn) in net.conns().iter().enumerate() {
        if let Some(&first) = seen.get(&conn) {
            report.add_error(ValidationError::DuplicateThroat {
                first,
                duplicate: t,
            });
        } else {
            seen.insert(conn, t);
        }
    }

    // 非有限坐标
    for (p, c) in net.coords().iter().enumerate() {
        if !c.is_finite() {
            report.add_error(ValidationError::NonFiniteCoord { pore: p });
        }
    }

    // 含 NaN 的属性
    for key in net.store().scalar_keys() {
        let Some(values) = net.store().scalar(key) else {
            continue;
        };
        let nan_count = values.iter().filter(|v| v.is_nan()).count();
        if nan_count > 0 {
            report.add_warning(ValidationWarning::NanProperty {
                key: key.to_string(),
                count: nan_count,
            });
        }
    }

    // 空标签
    for element in [Element::Pore, Element::Throat] {
        for key in net.labels().keys_of(element) {
            if net.labels().count(key).unwrap_or(0) == 0 {
                report.add_warning(ValidationWarning::EmptyLabel {
                    label: key.to_string(),
                });
            }
        }
    }

    report
}

// ============================================================================
// 测试
// ============================================================================
