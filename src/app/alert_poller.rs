// ==========================================
// 岗亭值勤轮换系统 - 值勤提醒轮询
// ==========================================
// 职责: 按固定间隔调用 alert_check，命中时输出告警日志
// 限制: 轮询间隔大于提醒窗口宽度时可能漏掉提醒（不做补偿）
// ==========================================

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::api::{AlertCheckView, DutyApi};
use crate::engine::query::AlertAudience;

pub struct AlertPoller {
    duty_api: Arc<DutyApi>,
    audience: AlertAudience,
    interval: Duration,
}

impl AlertPoller {
    pub fn new(
        duty_api: Arc<DutyApi>,
        audience: AlertAudience,
        poll_interval_seconds: u64,
    ) -> Self {
        Self {
            duty_api,
            audience,
            interval: Duration::from_secs(poll_interval_seconds.max(1)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// 单次判定
    pub fn poll_once(&self, now: NaiveDateTime) -> AlertCheckView {
        self.duty_api.alert_check_for(now, &self.audience)
    }

    /// 轮询直到 Ctrl-C
    pub async fn run(&self) -> usize {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "无法监听 Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// 轮询直到 shutdown 完成
    ///
    /// # 返回
    /// - 触发的提醒次数（同一时段只提醒一次）
    pub async fn run_until<F>(&self, shutdown: F) -> usize
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.interval);
        let mut last_alerted: Option<NaiveDateTime> = None;
        let mut fired = 0usize;

        tokio::pin!(shutdown);

        info!(
            interval_seconds = self.interval.as_secs(),
            audience = ?self.audience,
            "值勤提醒轮询启动"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!(fired, "值勤提醒轮询停止");
                    break;
                }
                _ = ticker.tick() => {
                    let now = Local::now().naive_local();
                    let check = self.poll_once(now);

                    let slot = match (check.should_alert, check.slot) {
                        (true, Some(slot)) => slot,
                        _ => {
                            debug!(now = %now, "无需提醒");
                            continue;
                        }
                    };

                    if last_alerted == Some(slot.start) {
                        continue;
                    }
                    last_alerted = Some(slot.start);
                    fired += 1;

                    warn!(
                        slot = %slot.display,
                        group = slot.group,
                        active_post = %slot.active_post,
                        "值勤即将开始"
                    );
                }
            }
        }

        fired
    }
}
