// shm-core/src/units.rs

use uom::si::f64::{
    Acceleration as UomAcceleration, Angle as UomAngle, AngularVelocity as UomAngularVelocity,
    Force as UomForce, Length as UomLength, Mass as UomMass, Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type Angle = UomAngle;
pub type AngularVelocity = UomAngularVelocity;
pub type Force = UomForce;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Time = UomTime;

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn mps2(v: f64) -> Accel {
    use uom::si::acceleration::meter_per_second_squared;
    Accel::new::<meter_per_second_squared>(v)
}

#[inline]
pub fn newton(v: f64) -> Force {
    use uom::si::force::newton;
    Force::new::<newton>(v)
}

#[inline]
pub fn rad(v: f64) -> Angle {
    use uom::si::angle::radian;
    Angle::new::<radian>(v)
}

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

#[inline]
pub fn rad_per_s(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::radian_per_second;
    AngularVelocity::new::<radian_per_second>(v)
}

/// Plain SI magnitudes, for feeding the f64 models.
pub mod si {
    use super::*;

    #[inline]
    pub fn kilograms(v: Mass) -> f64 {
        v.get::<uom::si::mass::kilogram>()
    }

    #[inline]
    pub fn meters(v: Length) -> f64 {
        v.get::<uom::si::length::meter>()
    }

    #[inline]
    pub fn seconds(v: Time) -> f64 {
        v.get::<uom::si::time::second>()
    }

    #[inline]
    pub fn meters_per_second_squared(v: Accel) -> f64 {
        v.get::<uom::si::acceleration::meter_per_second_squared>()
    }

    #[inline]
    pub fn newtons(v: Force) -> f64 {
        v.get::<uom::si::force::newton>()
    }

    #[inline]
    pub fn radians(v: Angle) -> f64 {
        v.get::<uom::si::angle::radian>()
    }

    #[inline]
    pub fn radians_per_second(v: AngularVelocity) -> f64 {
        v.get::<uom::si::angular_velocity::radian_per_second>()
    }
}

pub mod constants {
    use super::*;

    pub const G0_MPS2: f64 = 9.806_65;

    #[inline]
    pub fn g0() -> Accel {
        mps2(G0_MPS2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _m = kg(1.0);
        let _l = m(2.0);
        let _dt = s(0.1);
        let _f = newton(3.0);
        let _w = rad_per_s(10.0);
        let _g0 = constants::g0();
    }

    #[test]
    fn degrees_convert_to_radians() {
        let a = deg(90.0);
        assert!((si::radians(a) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn si_roundtrip_magnitudes() {
        assert!((si::meters(m(1.5)) - 1.5).abs() < 1e-12);
        assert!((si::meters_per_second_squared(constants::g0()) - constants::G0_MPS2).abs() < 1e-12);
    }
}
