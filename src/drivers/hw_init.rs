//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC channel and GPIO directions using raw ESP-IDF sys
//! calls. Called once from `main()` before the control loop starts.
//! Host builds are logged no-ops so the whole crate tests off-target.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::error::Error;
use crate::error::Result;
#[cfg(target_os = "espidf")]
use crate::pins;

/// ADC1 channel for the cabinet NTC (GPIO 9 on the S3).
pub const ADC1_CH_TEMP: u32 = 8;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<()> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_outputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<()> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// control-loop ADC read path.  No concurrent access is possible because
/// `init_adc()` completes before the loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<()> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        log::error!("hw_init: adc_oneshot_new_unit rc={ret}");
        return Err(Error::Init("ADC1 unit init failed"));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), ADC1_CH_TEMP, &chan_cfg) };
    if ret != ESP_OK as i32 {
        log::error!("hw_init: adc_oneshot_config_channel rc={ret}");
        return Err(Error::Init("ADC1 temp channel config failed"));
    }

    info!("hw_init: ADC1 configured (CH{ADC1_CH_TEMP}=temp)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — single-threaded control-loop access
    // only, after init_adc() has completed.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

// ── GPIO outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<()> {
    let output_pins = [
        pins::RELAY_GPIO,
        pins::HEARTBEAT_LED_GPIO,
        pins::DISPLAY_CLK_GPIO,
        pins::DISPLAY_DIO_GPIO,
    ];
    for pin in output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            log::error!("hw_init: gpio_config({pin}) rc={ret}");
            return Err(Error::Init("GPIO output config failed"));
        }
        // Everything boots de-asserted; the relay in particular must be open.
        unsafe { gpio_set_level(pin as gpio_num_t, 0) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: pin was configured as an output in init_gpio_outputs().
    unsafe {
        gpio_set_level(pin as gpio_num_t, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── Busy-wait delay (bit-bang timing) ─────────────────────────

#[cfg(target_os = "espidf")]
pub fn delay_us(us: u32) {
    // SAFETY: esp_rom_delay_us is a plain busy loop, safe from any context.
    unsafe {
        esp_rom_delay_us(us);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn delay_us(_us: u32) {}
