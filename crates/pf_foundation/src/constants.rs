// crates/pf_foundation/src/constants.rs

//! 物理常量
//!
//! 相物性关联式所需的基础物理常量，全部采用 SI 单位。

/// 通用气体常数 [J/(mol·K)]
pub const GAS_CONSTANT: f64 = 8.314462618;

/// 玻尔兹曼常数 [J/K]
pub const BOLTZMANN: f64 = 1.380649e-23;

/// 阿伏伽德罗常数 [1/mol]
pub const AVOGADRO: f64 = 6.02214076e23;

/// 标准大气压 [Pa]
pub const ATM: f64 = 101_325.0;

/// 摄氏零度对应的热力学温度 [K]
pub const ZERO_CELSIUS: f64 = 273.15;

/// 新建相对象的默认温度 [K]（25 °C）
pub const DEFAULT_TEMPERATURE: f64 = 298.15;

/// 新建相对象的默认压力 [Pa]
pub const DEFAULT_PRESSURE: f64 = ATM;

/// 浮点数相等性比较的默认容差
pub const DEFAULT_EPSILON: f64 = 1e-14;

/// 安全除法的最小分母阈值
pub const SAFE_DIV_EPSILON: f64 = 1e-30;

/// 迭代求解器的默认最大迭代次数
pub const DEFAULT_MAX_ITERATIONS: usize = 5000;

/// 迭代求解器的默认相对收敛容差
pub const DEFAULT_RTOL: f64 = 1e-8;

/// 迭代求解器的默认绝对收敛容差
pub const DEFAULT_ATOL: f64 = 1e-14;
